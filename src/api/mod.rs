pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, MessageBackend};
pub use client::{ContactClient, DEFAULT_BACKEND_URL};
pub use types::{HealthStatus, Message, MessageId, NewMessage};
