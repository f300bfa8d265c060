//! # Actions
//!
//! Everything that can happen in the app becomes an `Action`.
//! User presses Ctrl+R? That's `Action::Refresh`.
//! Backend answers the list call? That's `Action::MessagesLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state and returns the `Effect` the adapter should carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, error, info};

use crate::api::{Message, NewMessage};
use crate::core::form::{Field, FormEvent};
use crate::core::state::{App, FetchStatus, LOAD_FAILED_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Start a fetch sequence. Issued on mount, by the list's refresh
    /// control, and after a successful submission.
    Refresh,
    MessagesLoaded { epoch: u64, messages: Vec<Message> },
    /// `cause` is the raw error, kept for the log only.
    MessagesFailed { epoch: u64, cause: String },
    EditField(Field, String),
    SubmitForm,
    SubmitSucceeded(Message),
    SubmitFailed(String),
    Quit,
}

/// Side effect requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchMessages { epoch: u64 },
    SubmitMessage(NewMessage),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Refresh => begin_fetch(app),
        Action::MessagesLoaded { epoch, messages } => {
            if epoch != app.fetch_epoch {
                debug!(
                    "Discarding stale fetch result (epoch {}, latest {})",
                    epoch, app.fetch_epoch
                );
                return Effect::None;
            }
            info!("Loaded {} messages", messages.len());
            app.status_message = format!("{} messages", messages.len());
            app.messages = messages;
            app.fetch = FetchStatus::Ready;
            Effect::None
        }
        Action::MessagesFailed { epoch, cause } => {
            if epoch != app.fetch_epoch {
                debug!(
                    "Discarding stale fetch failure (epoch {}, latest {}): {}",
                    epoch, app.fetch_epoch, cause
                );
                return Effect::None;
            }
            error!("Error fetching messages: {}", cause);
            app.fetch = FetchStatus::Error(LOAD_FAILED_MESSAGE.to_string());
            app.status_message = "Load failed".to_string();
            Effect::None
        }
        Action::EditField(field, value) => {
            if !app.form.set_field(field, value) {
                debug!("Ignoring edit to {:?} while submitting", field);
            }
            Effect::None
        }
        Action::SubmitForm => match app.form.begin_submit() {
            Some(body) => {
                app.status_message = "Submitting...".to_string();
                Effect::SubmitMessage(body)
            }
            None => Effect::None,
        },
        Action::SubmitSucceeded(message) => {
            info!("Message {} created", message.id);
            match app.form.submit_succeeded() {
                Some(FormEvent::Submitted) => begin_fetch(app),
                None => Effect::None,
            }
        }
        Action::SubmitFailed(detail) => {
            info!("Submission rejected: {}", detail);
            app.form.submit_failed(&detail);
            app.status_message = "Submit failed".to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Loading → (ready | error). Each call supersedes any fetch still in flight.
fn begin_fetch(app: &mut App) -> Effect {
    app.fetch_epoch += 1;
    app.fetch = FetchStatus::Loading;
    app.status_message = "Loading messages...".to_string();
    Effect::FetchMessages {
        epoch: app.fetch_epoch,
    }
}
