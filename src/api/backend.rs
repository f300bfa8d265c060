use std::fmt;

use async_trait::async_trait;

use super::types::{Message, NewMessage};

/// Errors that can occur while talking to the message backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Create returned a non-2xx status. Carries the response `detail`
    /// when one could be read, otherwise a status-derived message.
    Submission(String),
    /// List (or health) returned a non-2xx status. Status-derived message only.
    Fetch(String),
    /// Transport-level failure (DNS, connection refused, reset).
    Network(String),
    /// A 2xx body that could not be decoded.
    Parse(String),
}

impl ApiError {
    /// The text shown next to the control that triggered the call.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Submission(msg)
            | ApiError::Fetch(msg)
            | ApiError::Network(msg)
            | ApiError::Parse(msg) => msg,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Submission(msg) => write!(f, "submission error: {msg}"),
            ApiError::Fetch(msg) => write!(f, "fetch error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Generic status message used whenever the backend gives nothing better.
pub fn status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

/// The two operations the application needs from the backend.
#[async_trait]
pub trait MessageBackend: Send + Sync {
    /// Root address the backend is reached at.
    fn base_url(&self) -> &str;

    /// Creates a message and returns the stored record.
    async fn submit(&self, message: &NewMessage) -> Result<Message, ApiError>;

    /// Returns every message, in the order the backend chose.
    async fn list(&self) -> Result<Vec<Message>, ApiError>;
}
