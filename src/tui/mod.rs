//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core `Action`s and executes the
//! `Effect`s the reducer asks for.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! 1. Sync component props from `App`.
//! 2. Redraw if anything changed.
//! 3. Poll terminal events (short timeout while a request is in flight,
//!    longer when idle) and drain everything pending before the next draw.
//! 4. Drain backend results from the channel and feed them to `update()`.
//!
//! Backend calls run as tokio tasks (see [`tasks`]); their results arrive as
//! `Action`s, so state is only ever mutated on this thread.

mod component;
mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ContactClient, MessageBackend};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ContactForm, FormFocus, FormInput, ListEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Form,
    List,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub contact_form: ContactForm,
    pub message_list: MessageListState,
    pub pane: Pane,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            contact_form: ContactForm::new(),
            message_list: MessageListState::new(),
            pane: Pane::Form, // User expects to type immediately
        }
    }

    /// Copy props from `App` into the persistent components.
    pub fn sync(&mut self, app: &App) {
        self.contact_form.sync(&app.form);
        self.contact_form.focused = self.pane == Pane::Form;
        self.message_list.loading = app.is_loading();
    }

    fn focus_form(&mut self, at: FormFocus) {
        self.pane = Pane::Form;
        self.contact_form.focus = at;
        self.contact_form.focused = true;
    }

    fn focus_list(&mut self) {
        self.pane = Pane::List;
        self.contact_form.focused = false;
    }
}

/// Route one terminal event to the component that owns it.
///
/// Returns the core action the event amounts to, if any. Focus changes and
/// scrolling are handled here without involving the core.
fn route_event(tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Escape => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        TuiEvent::FocusForm => {
            tui.focus_form(tui.contact_form.focus);
            return None;
        }
        TuiEvent::FocusList => {
            tui.focus_list();
            return None;
        }
        // Refresh and wheel scrolling reach the list from either pane.
        TuiEvent::Refresh | TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            return tui
                .message_list
                .handle_event(event)
                .map(|ListEvent::Refresh| Action::Refresh);
        }
        _ => {}
    }

    match tui.pane {
        Pane::Form => match tui.contact_form.handle_event(event)? {
            FormInput::Changed(field, value) => Some(Action::EditField(field, value)),
            FormInput::Submit => Some(Action::SubmitForm),
            FormInput::LeaveForward | FormInput::LeaveBackward => {
                tui.focus_list();
                None
            }
        },
        Pane::List => match event {
            TuiEvent::FocusNext => {
                tui.focus_form(FormFocus::Name);
                None
            }
            TuiEvent::FocusPrev => {
                tui.focus_form(FormFocus::Submit);
                None
            }
            // Ctrl+S still submits while browsing the list.
            TuiEvent::SubmitForm => tui
                .contact_form
                .handle_event(event)
                .map(|_| Action::SubmitForm),
            _ => tui
                .message_list
                .handle_event(event)
                .map(|ListEvent::Refresh| Action::Refresh),
        },
    }
}

/// Apply an action and launch whatever effect it produces.
/// Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    action: Action,
    backend: &Arc<dyn MessageBackend>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        effect => {
            tasks::spawn_effect(backend.clone(), effect, tx.clone());
            false
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    info!("Using backend {}", config.backend_url);
    let backend: Arc<dyn MessageBackend> = Arc::new(ContactClient::new(config.backend_url));
    let mut app = App::new(backend.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Mount: load the list once before the first frame.
    dispatch(&mut app, Action::Refresh, &backend, &tx);

    let mut needs_redraw = true; // Force first frame

    let result = loop {
        tui.sync(&app);

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        // Poll quickly while a request is in flight so results show promptly.
        let busy = app.is_loading() || app.form.is_submitting();
        let timeout = if busy {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut tui, &event) {
                debug!("Event {:?} -> {:?}", event, action);
                should_quit |= dispatch(&mut app, action, &backend, &tx);
            }
            // Keep props current for the next event in this batch.
            tui.sync(&app);
        }

        if should_quit {
            break Ok(());
        }

        // Handle background task actions (backend results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            dispatch(&mut app, action, &backend, &tx);
        }
    };

    ratatui::restore();
    info!("Shutting down");
    result
}
