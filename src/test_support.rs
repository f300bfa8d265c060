//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{ApiError, Message, MessageBackend, MessageId, NewMessage};

/// In-memory backend with scripted responses.
///
/// Responses are consumed in order. An exhausted list queue answers `[]`;
/// an exhausted submit queue answers with a submission error.
#[derive(Default)]
pub struct StubBackend {
    list_responses: Mutex<VecDeque<Result<Vec<Message>, ApiError>>>,
    submit_responses: Mutex<VecDeque<Result<Message, ApiError>>>,
    submissions: Mutex<Vec<NewMessage>>,
    list_calls: AtomicUsize,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, response: Result<Vec<Message>, ApiError>) -> Self {
        self.list_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn with_submit(self, response: Result<Message, ApiError>) -> Self {
        self.submit_responses.lock().unwrap().push_back(response);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<NewMessage> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageBackend for StubBackend {
    fn base_url(&self) -> &str {
        "http://stub.test"
    }

    async fn submit(&self, message: &NewMessage) -> Result<Message, ApiError> {
        self.submissions.lock().unwrap().push(message.clone());
        self.submit_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Submission("no stubbed response".to_string())))
    }

    async fn list(&self) -> Result<Vec<Message>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.list_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Creates a test App backed by an empty StubBackend.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubBackend::new()))
}

/// A message with predictable contents, created at midnight UTC on Jan 1 2024.
pub fn sample_message(id: i64, name: &str) -> Message {
    Message {
        id: MessageId::Number(id),
        name: name.to_string(),
        email: format!("{}@x.com", name.to_lowercase()),
        message: format!("hello from {name}"),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}
