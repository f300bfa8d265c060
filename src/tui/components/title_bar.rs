//! # TitleBar Component
//!
//! Top status bar: application name, tagline, backend address and the
//! transient status message.
//!
//! Purely presentational. All fields are props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.backend_url().to_string(), app.status_message.clone());
//! title_bar.render(frame, title_area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Status message**: `"Contact Form App · <tagline> (backend: url) | Loading messages..."`
//! 2. **Default**: `"Contact Form App · <tagline> (backend: url)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub const APP_TITLE: &str = "Contact Form App";
pub const APP_TAGLINE: &str = "Test your hosting platform deployment";

pub struct TitleBar {
    /// Backend base URL the client talks to
    pub backend_url: String,
    /// Status message (e.g., "Loading messages...", "Submitting...")
    pub status_message: String,
}

impl TitleBar {
    pub fn new(backend_url: String, status_message: String) -> Self {
        Self {
            backend_url,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(APP_TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(" · {APP_TAGLINE} (backend: {})", self.backend_url)),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(120, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "http://localhost:8000".to_string(),
            "Loading messages...".to_string(),
        );
        let text = render_text(&mut title_bar);
        assert!(text.contains(APP_TITLE));
        assert!(text.contains(APP_TAGLINE));
        assert!(text.contains("http://localhost:8000"));
        assert!(text.contains("| Loading messages..."));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("http://api".to_string(), String::new());
        let text = render_text(&mut title_bar);
        assert!(text.contains("backend: http://api"));
        assert!(!text.contains('|'));
    }
}
