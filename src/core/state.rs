//! # Application State
//!
//! Core business state. Presentation state (focus, cursors, scroll) lives in
//! the `tui` module.
//!
//! ```text
//! App
//! ├── backend: Arc<dyn MessageBackend>  // HTTP collaborator
//! ├── messages: Vec<Message>            // canonical collection, backend order
//! ├── fetch: FetchStatus                // loading | error | ready
//! ├── fetch_epoch: u64                  // tag of the latest fetch issued
//! ├── form: SubmissionForm              // form fields + submit lifecycle
//! └── status_message: String            // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::api::{Message, MessageBackend};
use crate::core::form::SubmissionForm;

/// Shown in place of the list when a fetch fails. The underlying cause is
/// logged, not displayed.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load messages. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Error(String),
    Ready,
}

pub struct App {
    pub backend: Arc<dyn MessageBackend>,
    pub messages: Vec<Message>,
    pub fetch: FetchStatus,
    pub fetch_epoch: u64,
    pub form: SubmissionForm,
    pub status_message: String,
}

impl App {
    /// Starts in `Loading`: the first thing the shell does is fetch.
    pub fn new(backend: Arc<dyn MessageBackend>) -> Self {
        Self {
            backend,
            messages: Vec::new(),
            fetch: FetchStatus::Loading,
            fetch_epoch: 0,
            form: SubmissionForm::new(),
            status_message: String::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fetch == FetchStatus::Loading
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.fetch {
            FetchStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.is_loading());
        assert!(app.messages.is_empty());
        assert_eq!(app.fetch_epoch, 0);
        assert_eq!(app.fetch_error(), None);
        assert_eq!(app.backend_url(), "http://stub.test");
    }

    #[test]
    fn test_fetch_error_accessor() {
        let mut app = test_app();
        app.fetch = FetchStatus::Error(LOAD_FAILED_MESSAGE.to_string());
        assert!(!app.is_loading());
        assert_eq!(app.fetch_error(), Some(LOAD_FAILED_MESSAGE));
    }
}
