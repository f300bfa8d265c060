//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.contact-form/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The backend URL is resolved once here and handed to the API client at
//! construction; nothing else reads the environment for it.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_BACKEND_URL;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Environment variable selecting the backend base URL.
pub const BACKEND_URL_ENV: &str = "VITE_BACKEND_URL";
pub const DEFAULT_LOG_FILE: &str = "contact-form.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    /// Problems found while resolving. Reported by the caller once logging is up.
    pub warnings: Vec<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.contact-form/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".contact-form").join("config.toml"))
}

/// Load config from `~/.contact-form/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AppConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AppConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`], for an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AppConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AppConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Contact Form Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"
# log_file = "contact-form.log"

# [backend]
# base_url = "http://localhost:8000" # Or set VITE_BACKEND_URL env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_backend_url` comes from `--backend-url` (None = not specified).
pub fn resolve(config: &AppConfig, cli_backend_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(
        config,
        cli_backend_url,
        std::env::var(BACKEND_URL_ENV).ok().as_deref(),
    )
}

/// Resolution with the environment value passed in explicitly.
fn resolve_with_env(
    config: &AppConfig,
    cli_backend_url: Option<&str>,
    env_backend_url: Option<&str>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default. Blank values count as unset.
    let backend_url = [
        cli_backend_url,
        env_backend_url,
        config.backend.base_url.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|url| !url.is_empty())
    .unwrap_or(DEFAULT_BACKEND_URL)
    .to_string();

    let mut warnings = Vec::new();
    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                warnings.push(format!("Unknown log level '{}', using default", level));
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    let log_file = config
        .general
        .log_file
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    ResolvedConfig {
        backend_url,
        log_level,
        log_file,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert!(config.backend.base_url.is_none());
        assert!(config.general.log_level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = AppConfig::default();
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.backend_url, "http://localhost:8000");
        assert_eq!(resolved.log_level, LevelFilter::Info);
        assert_eq!(resolved.log_file, PathBuf::from("contact-form.log"));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AppConfig {
            general: GeneralConfig {
                log_level: Some("debug".to_string()),
                log_file: Some("/tmp/cf.log".to_string()),
            },
            backend: BackendConfig {
                base_url: Some("https://api.example.com".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.backend_url, "https://api.example.com");
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/cf.log"));
    }

    #[test]
    fn test_env_wins_over_config() {
        let config = AppConfig {
            backend: BackendConfig {
                base_url: Some("https://from-file".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, Some("https://from-env"));
        assert_eq!(resolved.backend_url, "https://from-env");
    }

    #[test]
    fn test_resolve_cli_backend_wins() {
        let config = AppConfig {
            backend: BackendConfig {
                base_url: Some("https://from-file".to_string()),
            },
            ..Default::default()
        };
        let resolved =
            resolve_with_env(&config, Some("https://from-cli"), Some("https://from-env"));
        assert_eq!(resolved.backend_url, "https://from-cli");
    }

    #[test]
    fn test_blank_env_falls_through() {
        let config = AppConfig::default();
        let resolved = resolve_with_env(&config, None, Some("   "));
        assert_eq!(resolved.backend_url, DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_unknown_log_level_uses_default() {
        let config = AppConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                log_file: None,
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, None, None);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.warnings, vec!["Unknown log level 'loud', using default"]);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "warn"
log_file = "cf.log"

[backend]
base_url = "http://192.168.1.100:8000"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("warn"));
        assert_eq!(config.general.log_file.as_deref(), Some("cf.log"));
        assert_eq!(
            config.backend.base_url.as_deref(),
            Some("http://192.168.1.100:8000")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[backend]
base_url = "http://staging:8000"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.backend.base_url.as_deref(), Some("http://staging:8000"));
        assert!(config.general.log_level.is_none());
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("contact-form-cfg-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let config = load_config_from(&path).unwrap();
        assert!(config.backend.base_url.is_none());
        assert!(path.exists());

        // The generated file is all comments and must parse back to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.backend.base_url.is_none());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("contact-form-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[backend\nbase_url = ").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));

        let _ = fs::remove_dir_all(&dir);
    }
}
