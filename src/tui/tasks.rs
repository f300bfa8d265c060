//! Background execution of effects.
//!
//! Each effect is one backend round trip. The outcome is turned back into an
//! `Action` and sent to the event loop; state is never touched from here.
//! Tasks are not cancelled: one that outlives the UI just finds the
//! receiver gone.

use std::sync::{Arc, mpsc};

use log::{info, warn};

use crate::api::MessageBackend;
use crate::core::action::{Action, Effect};

/// Perform `effect` against `backend` and return the follow-up action.
///
/// `Effect::None` and `Effect::Quit` need no I/O and yield nothing.
pub async fn run_effect(backend: &dyn MessageBackend, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchMessages { epoch } => {
            let action = match backend.list().await {
                Ok(messages) => Action::MessagesLoaded { epoch, messages },
                Err(e) => Action::MessagesFailed {
                    epoch,
                    cause: e.to_string(),
                },
            };
            Some(action)
        }
        Effect::SubmitMessage(body) => {
            let action = match backend.submit(&body).await {
                Ok(message) => Action::SubmitSucceeded(message),
                // The write path forwards the backend's own wording.
                Err(e) => Action::SubmitFailed(e.detail().to_string()),
            };
            Some(action)
        }
        Effect::None | Effect::Quit => None,
    }
}

/// Spawn `effect` on the tokio runtime, reporting back through `tx`.
///
/// Returns None for effects that need no background work.
pub fn spawn_effect(
    backend: Arc<dyn MessageBackend>,
    effect: Effect,
    tx: mpsc::Sender<Action>,
) -> Option<tokio::task::JoinHandle<()>> {
    if matches!(effect, Effect::None | Effect::Quit) {
        return None;
    }
    info!("Spawning backend request: {:?}", effect);
    Some(tokio::spawn(async move {
        if let Some(action) = run_effect(backend.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver backend result: receiver dropped");
        }
    }))
}
