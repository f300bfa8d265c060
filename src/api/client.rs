//! HTTP client for the contact-form backend.
//!
//! Two routes matter to the application, both under `/api/messages`:
//! `POST` creates a message, `GET` lists them. A `/health` probe is also
//! exposed for the `--check` CLI mode.
//!
//! Every call is a single round trip. No retries, no client-side timeout,
//! no caching.

use async_trait::async_trait;
use log::{debug, info, warn};

use super::backend::{ApiError, MessageBackend, status_message};
use super::types::{ErrorBody, HealthStatus, Message, NewMessage};

/// Local development backend, used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// reqwest-backed implementation of [`MessageBackend`].
pub struct ContactClient {
    base_url: String,
    client: reqwest::Client,
}

impl ContactClient {
    /// Creates a client rooted at `base_url`. A trailing `/` is dropped so
    /// route paths can be appended directly.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }

    /// Probes `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Health response status: {}", status);
        if !status.is_success() {
            warn!("Health check failed: HTTP {}", status.as_u16());
            return Err(ApiError::Fetch(status_message(status.as_u16())));
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MessageBackend for ContactClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn submit(&self, message: &NewMessage) -> Result<Message, ApiError> {
        info!("Submitting message from '{}'", message.name);

        let response = self
            .client
            .post(self.messages_url())
            .json(message)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Create response status: {}", status);

        if !status.is_success() {
            let code = status.as_u16();
            // Body is optional and may not be JSON at all; fall back to the status.
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail_text())
                .unwrap_or_else(|| status_message(code));
            warn!("Create failed: HTTP {} - {}", code, detail);
            return Err(ApiError::Submission(detail));
        }

        response
            .json::<Message>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn list(&self) -> Result<Vec<Message>, ApiError> {
        info!("Fetching messages from {}", self.base_url);

        let response = self
            .client
            .get(self.messages_url())
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("List response status: {}", status);

        if !status.is_success() {
            warn!("List failed: HTTP {}", status.as_u16());
            return Err(ApiError::Fetch(status_message(status.as_u16())));
        }

        let messages = response
            .json::<Vec<Message>>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!("Fetched {} messages", messages.len());
        Ok(messages)
    }
}
