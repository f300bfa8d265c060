//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Top status bar with backend address and status
//! - `MessageCard`: One submitted message
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `ContactForm`: Name/Email/Message inputs and the submit button
//! - `MessageList`: Loading/error/empty/cards view with a refresh control
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields set by the
//! parent), never by reaching into `App`. Outward actions are returned as
//! component events (`FormInput`, `ListEvent`) and the event loop turns them
//! into core `Action`s.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message_card.rs  (Single message renderer)
//! ├── message_list.rs  (Scrollable message container)
//! └── contact_form/    (Submission form + text input layout)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod contact_form;
pub use contact_form::{ContactForm, FormFocus, FormInput};
pub mod message_card;
pub mod message_list;
pub use message_list::{ListEvent, MessageList, MessageListState};
