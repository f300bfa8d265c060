//! # Submission Form
//!
//! Field values and the submit lifecycle, independent of any UI.
//!
//! ```text
//!           submit (fields ok)            backend 2xx
//!   Idle ─────────────────────▶ Submitting ────────────▶ Succeeded
//!    ▲  │                            │                     │
//!    │  │ submit (blank field)       │ backend error       │
//!    │  ▼                            ▼                     │
//!    └─ Failed ◀─────────────────────┘                     │
//!    ▲      edit                                           │
//!    └─────────────────────────────────────────────────────┘
//! ```
//!
//! While `Submitting`, edits and further submits are ignored, so a single
//! form never has more than one request in flight.

use std::fmt;

use crate::api::NewMessage;

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit message. Please try again.";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Message submitted successfully!";

/// One of the three editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Enter your name",
            Field::Email => "Enter your email",
            Field::Message => "Enter your message",
        }
    }
}

/// Raw field values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Required-field check. Every field must have non-whitespace content;
    /// the request body carries the trimmed values.
    pub fn validate(&self) -> Result<NewMessage, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            return Err(ValidationError);
        }
        Ok(NewMessage::new(name, email, message))
    }
}

/// A field was empty or whitespace-only. Never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError;

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REQUIRED_FIELDS_MESSAGE)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Emitted to the owner of the form. Carries no payload: the owner
/// re-reads authoritative state from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Submitted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub fields: FormState,
    pub status: FormStatus,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Error text to show under the form, if any.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Replaces one field's value. Clears any success/error display.
    ///
    /// Returns false (and changes nothing) while a submission is in flight.
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if self.is_submitting() {
            return false;
        }
        *self.fields.get_mut(field) = value;
        self.status = FormStatus::Idle;
        true
    }

    /// Starts a submission.
    ///
    /// Returns the request body when validation passes; the caller is
    /// expected to send exactly one request with it. Returns None when a
    /// submission is already in flight or a field is blank (the latter
    /// moves the form to `Failed`).
    pub fn begin_submit(&mut self) -> Option<NewMessage> {
        if self.is_submitting() {
            return None;
        }
        match self.fields.validate() {
            Ok(body) => {
                self.status = FormStatus::Submitting;
                Some(body)
            }
            Err(e) => {
                self.status = FormStatus::Failed(e.to_string());
                None
            }
        }
    }

    /// Backend accepted the submission: clear the fields and notify the owner.
    pub fn submit_succeeded(&mut self) -> Option<FormEvent> {
        if !self.is_submitting() {
            return None;
        }
        self.fields.clear();
        self.status = FormStatus::Succeeded;
        Some(FormEvent::Submitted)
    }

    /// Backend rejected the submission. Field values are kept.
    pub fn submit_failed(&mut self, message: &str) {
        if !self.is_submitting() {
            return;
        }
        let message = message.trim();
        let text = if message.is_empty() {
            SUBMIT_FALLBACK_MESSAGE.to_string()
        } else {
            message.to_string()
        };
        self.status = FormStatus::Failed(text);
    }
}
