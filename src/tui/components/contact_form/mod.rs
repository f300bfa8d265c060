//! # ContactForm Component
//!
//! The submission form: Name, Email and Message inputs plus a submit button.
//!
//! ## Responsibilities
//!
//! - Capture text input for the focused field (insert, delete, cursor movement, paste)
//! - Move focus between the inputs and the submit button
//! - Render the error/success notice and the button label for the current status
//!
//! ## State Management
//!
//! Field values and the submit status are props synced from `App` each frame
//! (see [`ContactForm::sync`]); edits are applied locally for immediate echo
//! and reported upward as [`FormInput::Changed`] so the core stays the owner.
//! Focus and per-field cursors are internal presentation state.
//!
//! While the status is `Submitting` every input and the button are disabled:
//! edits and submits are swallowed, only focus movement still works.

mod text_area;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::form::{Field, FormState, FormStatus, SUBMIT_SUCCESS_MESSAGE, SubmissionForm};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_area::{
    clamp_to_boundary, cursor_row_col, hard_wrap, next_char_boundary, prev_char_boundary,
};

pub const FORM_TITLE: &str = "Submit a Message";
pub const SUBMIT_LABEL: &str = "Submit";
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Which control inside the form has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Name,
    Email,
    Message,
    Submit,
}

impl FormFocus {
    pub fn field(self) -> Option<Field> {
        match self {
            FormFocus::Name => Some(Field::Name),
            FormFocus::Email => Some(Field::Email),
            FormFocus::Message => Some(Field::Message),
            FormFocus::Submit => None,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            FormFocus::Name => Some(FormFocus::Email),
            FormFocus::Email => Some(FormFocus::Message),
            FormFocus::Message => Some(FormFocus::Submit),
            FormFocus::Submit => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            FormFocus::Name => None,
            FormFocus::Email => Some(FormFocus::Name),
            FormFocus::Message => Some(FormFocus::Email),
            FormFocus::Submit => Some(FormFocus::Message),
        }
    }
}

/// High-level events emitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormInput {
    /// A field now holds this value.
    Changed(Field, String),
    /// Submit was pressed on an enabled form.
    Submit,
    /// Tab past the button: hand focus to the next pane.
    LeaveForward,
    /// Shift+Tab before the first field: hand focus to the previous pane.
    LeaveBackward,
}

pub struct ContactForm {
    /// Field values (Prop)
    pub fields: FormState,
    /// Submit lifecycle (Prop)
    pub status: FormStatus,
    /// Whether the form pane has keyboard focus (Prop)
    pub focused: bool,
    pub focus: FormFocus,
    /// Byte offset of the cursor in each field, indexed like `Field::ALL`
    cursors: [usize; 3],
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

fn field_index(field: Field) -> usize {
    match field {
        Field::Name => 0,
        Field::Email => 1,
        Field::Message => 2,
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: FormState::default(),
            status: FormStatus::Idle,
            focused: true,
            focus: FormFocus::Name,
            cursors: [0; 3],
        }
    }

    /// Pull props from the core form. Cursors are clamped in case a value
    /// was replaced (e.g. cleared after a successful submit).
    pub fn sync(&mut self, form: &SubmissionForm) {
        if self.fields != form.fields {
            self.fields = form.fields.clone();
        }
        self.status = form.status.clone();
        for field in Field::ALL {
            let idx = field_index(field);
            self.cursors[idx] = clamp_to_boundary(self.fields.get(field), self.cursors[idx]);
        }
    }

    fn disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.fields.name,
            Field::Email => &mut self.fields.email,
            Field::Message => &mut self.fields.message,
        }
    }

    /// Apply an edit to the focused field. The closure receives the value and
    /// cursor, and returns whether the value changed.
    fn edit(&mut self, apply: impl FnOnce(&mut String, &mut usize) -> bool) -> Option<FormInput> {
        let field = self.focus.field()?;
        if self.disabled() {
            return None;
        }
        let mut cursor = self.cursors[field_index(field)];
        let value = self.value_mut(field);
        let changed = apply(value, &mut cursor);
        let snapshot = changed.then(|| value.clone());
        self.cursors[field_index(field)] = cursor;
        snapshot.map(|v| FormInput::Changed(field, v))
    }

    /// Move the cursor within the focused field. Never emits.
    fn move_cursor(&mut self, to: impl FnOnce(&str, usize) -> usize) {
        if let Some(field) = self.focus.field() {
            let idx = field_index(field);
            self.cursors[idx] = to(self.fields.get(field), self.cursors[idx]);
        }
    }

    fn render_input(&self, frame: &mut Frame, area: Rect, field: Field) {
        let is_active = self.focused && self.focus.field() == Some(field);
        let border_style = if self.disabled() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else if is_active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(field.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let value = self.fields.get(field);
        if value.is_empty() {
            let placeholder = Paragraph::new(field.placeholder()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
            frame.render_widget(placeholder, inner);
            if is_active && !self.disabled() {
                frame.set_cursor_position((inner.x, inner.y));
            }
            return;
        }

        let cursor = clamp_to_boundary(value, self.cursors[field_index(field)]);
        let (row, col) = cursor_row_col(&value[..cursor], inner.width);
        // Keep the cursor row on screen.
        let scroll = row.saturating_sub(inner.height.saturating_sub(1));

        let lines: Vec<Line> = hard_wrap(value, inner.width)
            .into_iter()
            .skip(usize::from(scroll))
            .take(usize::from(inner.height))
            .map(Line::from)
            .collect();

        let text_style = if self.disabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(lines).style(text_style), inner);

        if is_active && !self.disabled() {
            frame.set_cursor_position((inner.x + col, inner.y + (row - scroll)));
        }
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.status {
            FormStatus::Failed(msg) => (msg.as_str(), Style::default().fg(Color::Red)),
            FormStatus::Succeeded => (SUBMIT_SUCCESS_MESSAGE, Style::default().fg(Color::Green)),
            FormStatus::Idle | FormStatus::Submitting => return,
        };
        frame.render_widget(Paragraph::new(text).style(style).wrap(Wrap { trim: true }), area);
    }

    fn render_button(&self, frame: &mut Frame, area: Rect) {
        let (label, style) = if self.disabled() {
            (
                SUBMITTING_LABEL,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else if self.focused && self.focus == FormFocus::Submit {
            (
                SUBMIT_LABEL,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (SUBMIT_LABEL, Style::default().fg(Color::Green))
        };

        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::bordered().border_type(BorderType::Rounded).border_style(style));
        frame.render_widget(button, area);
    }
}

impl Component for ContactForm {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(FORM_TITLE).style(Style::default().add_modifier(Modifier::BOLD)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [name_area, email_area, message_area, notice_area, button_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(3),
        ])
        .areas(inner);

        self.render_input(frame, name_area, Field::Name);
        self.render_input(frame, email_area, Field::Email);
        self.render_input(frame, message_area, Field::Message);
        self.render_notice(frame, notice_area);
        self.render_button(frame, button_area);
    }
}

impl EventHandler for ContactForm {
    type Event = FormInput;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::FocusNext => match self.focus.next() {
                Some(next) => {
                    self.focus = next;
                    None
                }
                None => Some(FormInput::LeaveForward),
            },
            TuiEvent::FocusPrev => match self.focus.prev() {
                Some(prev) => {
                    self.focus = prev;
                    None
                }
                None => Some(FormInput::LeaveBackward),
            },
            TuiEvent::CursorUp => {
                if let Some(prev) = self.focus.prev() {
                    self.focus = prev;
                }
                None
            }
            TuiEvent::CursorDown => {
                if let Some(next) = self.focus.next() {
                    self.focus = next;
                }
                None
            }
            TuiEvent::SubmitForm => (!self.disabled()).then_some(FormInput::Submit),
            TuiEvent::Submit => match self.focus {
                FormFocus::Name | FormFocus::Email => {
                    self.focus = self.focus.next().unwrap_or(FormFocus::Submit);
                    None
                }
                FormFocus::Message | FormFocus::Submit => {
                    (!self.disabled()).then_some(FormInput::Submit)
                }
            },
            TuiEvent::InputChar(' ') if self.focus == FormFocus::Submit => {
                (!self.disabled()).then_some(FormInput::Submit)
            }
            TuiEvent::InputChar(c) => {
                let c = *c;
                if c == '\n' && self.focus != FormFocus::Message {
                    return None;
                }
                self.edit(|value, cursor| {
                    value.insert(*cursor, c);
                    *cursor += c.len_utf8();
                    true
                })
            }
            TuiEvent::Paste(text) => {
                let text = if self.focus == FormFocus::Message {
                    text.clone()
                } else {
                    text.replace(['\r', '\n'], " ")
                };
                self.edit(|value, cursor| {
                    value.insert_str(*cursor, &text);
                    *cursor += text.len();
                    !text.is_empty()
                })
            }
            TuiEvent::Backspace => self.edit(|value, cursor| {
                if *cursor == 0 {
                    return false;
                }
                let prev = prev_char_boundary(value, *cursor);
                value.drain(prev..*cursor);
                *cursor = prev;
                true
            }),
            TuiEvent::Delete => self.edit(|value, cursor| {
                if *cursor >= value.len() {
                    return false;
                }
                let next = next_char_boundary(value, *cursor);
                value.drain(*cursor..next);
                true
            }),
            TuiEvent::CursorLeft => {
                self.move_cursor(|value, pos| {
                    if pos > 0 {
                        prev_char_boundary(value, pos)
                    } else {
                        0
                    }
                });
                None
            }
            TuiEvent::CursorRight => {
                self.move_cursor(|value, pos| {
                    if pos < value.len() {
                        next_char_boundary(value, pos)
                    } else {
                        pos
                    }
                });
                None
            }
            TuiEvent::CursorHome => {
                self.move_cursor(|value, pos| value[..pos].rfind('\n').map_or(0, |i| i + 1));
                None
            }
            TuiEvent::CursorEnd => {
                self.move_cursor(|value, pos| {
                    value[pos..].find('\n').map_or(value.len(), |i| pos + i)
                });
                None
            }
            _ => None,
        }
    }
}
