use clap::Parser;
use contact_form::api::{ContactClient, MessageBackend};
use contact_form::core::config::{self, ResolvedConfig};
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(
    name = "contact-form",
    about = "Submit and browse messages on a contact form backend"
)]
struct Args {
    /// Backend base URL (overrides config file and VITE_BACKEND_URL)
    #[arg(short, long)]
    backend_url: Option<String>,

    /// Probe the backend and print what it returns instead of starting the UI
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (app_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let resolved = config::resolve(&app_config, args.backend_url.as_deref());

    // File logger; stdout belongs to the terminal UI.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    // Config was read before the logger existed; report what it found now.
    match (config_error, config::config_path()) {
        (Some(e), _) => log::warn!("Using default config: {}", e),
        (None, Some(path)) => log::info!("Config file: {}", path.display()),
        (None, None) => log::warn!("Could not determine home directory, using default config"),
    }
    for warning in &resolved.warnings {
        log::warn!("{}", warning);
    }
    log::info!("Contact form starting up with config: {:?}", resolved);

    if args.check {
        return check(&resolved).await;
    }

    contact_form::tui::run(resolved)
}

/// One-shot connectivity probe for deployment checks.
async fn check(config: &ResolvedConfig) -> std::io::Result<()> {
    let client = ContactClient::new(config.backend_url.clone());
    println!("Backend: {}", client.base_url());

    let mut healthy = true;
    match client.health().await {
        Ok(health) => println!("Health: {}", health.status),
        Err(e) => {
            healthy = false;
            println!("Health: {}", e);
        }
    }
    match client.list().await {
        Ok(messages) => println!("Messages: {}", messages.len()),
        Err(e) => {
            healthy = false;
            println!("Messages: {}", e);
        }
    }

    if healthy {
        Ok(())
    } else {
        Err(std::io::Error::other("backend check failed"))
    }
}
