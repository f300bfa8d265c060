use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend-assigned message identity.
///
/// Some deployments hand out integer keys, others UUID strings, so both
/// shapes are accepted and displayed verbatim.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{n}"),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

/// A submitted contact-form record as the backend returns it.
///
/// `created_at` is kept exactly as sent; it is only parsed for display.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
}

/// Request body for creating a message.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl NewMessage {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }
}

/// Response body of the health endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

/// Error body returned on a failed create, e.g. `{"detail": "email invalid"}`.
///
/// `detail` is either a plain string or, for request validation failures,
/// a list of `{loc, msg, type}` objects.
#[derive(Deserialize, Debug)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Human-readable detail, if the body carried a usable one.
    pub(crate) fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Array(entries) => {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(|m| m.as_str()))
                    .collect();
                (!msgs.is_empty()).then(|| msgs.join("; "))
            }
            _ => None,
        }
    }
}
