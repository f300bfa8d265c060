//! # Core Application Logic
//!
//! The contact-form client's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Form (submit FSM)    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │  spawns ─────▶ │    API     │
//!          │  Adapter   │                │  (reqwest) │
//!          │ (ratatui)  │ ◀──── Action   │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`form`]: Field values and the submission state machine
//! - [`config`]: Layered configuration
//! - [`format`]: Timestamp display

pub mod action;
pub mod config;
pub mod form;
pub mod format;
pub mod state;
