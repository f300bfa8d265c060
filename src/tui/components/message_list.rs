//! # MessageList Component
//!
//! Displays the message collection the shell owns.
//!
//! ## Responsibilities
//!
//! - Render exactly one of: loading, error, empty, or the message cards
//! - Show the refresh control (disabled while loading)
//! - Scroll through cards
//!
//! Rendering is a pure function of `{messages, loading, error}`; the only
//! state kept here is the scroll position. The list never fetches: pressing
//! refresh emits [`ListEvent::Refresh`] and the owner does the rest.
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state and layout cache) and
//! the props.
//!
//! Card heights are cached in a [`LayoutCache`] and only recomputed when the
//! collection or the width changes. Positions are `u32` so a long collection
//! never overflows; only the cards near the viewport are painted, into a
//! window-sized `ScrollView`.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Padding, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::api::Message;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message_card::MessageCard;
use crate::tui::event::TuiEvent;

pub const LIST_TITLE: &str = "Submitted Messages";
pub const LOADING_TEXT: &str = "Loading messages...";
pub const EMPTY_TEXT: &str = "No messages yet. Be the first to submit one!";
const REFRESH_LABEL: &str = "[ Refresh ^R ]";

/// High-level events emitted by the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListEvent {
    Refresh,
}

/// Scroll state for the message list, persisted in `TuiState`.
pub struct MessageListState {
    /// Mirrors the shell's loading flag (Prop); disables refresh while set.
    pub loading: bool,
    /// First visible row of the whole collection
    offset: u32,
    /// Last known viewport height (for scroll clamping between frames)
    viewport_height: u16,
    layout: LayoutCache,
    /// Offset inside the painted window; rebuilt every frame
    window_state: ScrollViewState,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            loading: true,
            offset: 0,
            viewport_height: 0,
            layout: LayoutCache::new(),
            window_state: ScrollViewState::default(),
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    fn max_offset(&self) -> u32 {
        self.layout
            .total_height()
            .saturating_sub(u32::from(self.viewport_height))
    }

    fn scroll_by(&mut self, delta: i64) {
        let target = (i64::from(self.offset) + delta).clamp(0, i64::from(self.max_offset()));
        self.offset = u32::try_from(target).unwrap_or(0);
    }

    fn page(&self) -> i64 {
        i64::from(self.viewport_height.max(1))
    }
}

impl EventHandler for MessageListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Refresh | TuiEvent::InputChar('r') | TuiEvent::Submit => {
                // Disabled control: the press goes nowhere.
                (!self.loading).then_some(ListEvent::Refresh)
            }
            TuiEvent::CursorUp | TuiEvent::ScrollUp => {
                self.scroll_by(-1);
                None
            }
            TuiEvent::CursorDown | TuiEvent::ScrollDown => {
                self.scroll_by(1);
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_by(-self.page());
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_by(self.page());
                None
            }
            TuiEvent::CursorHome => {
                self.offset = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.offset = self.max_offset();
                None
            }
            _ => None,
        }
    }
}

/// Cached card heights and their running totals.
///
/// Valid while the message count, the bodies and the content width are
/// unchanged; `ensure` rebuilds it otherwise.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    /// `prefix_heights[i]` is the bottom edge of card `i`
    pub prefix_heights: Vec<u32>,
    message_count: usize,
    content_width: u16,
    fingerprint: u64,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
            fingerprint: 0,
        }
    }

    /// Only the body affects a card's height.
    fn fingerprint(messages: &[Message]) -> u64 {
        let mut hasher = DefaultHasher::new();
        for message in messages {
            message.message.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Rebuild heights if `messages` or `content_width` changed since the last call.
    pub fn ensure(&mut self, messages: &[Message], content_width: u16) {
        let fingerprint = Self::fingerprint(messages);
        if self.message_count == messages.len()
            && self.content_width == content_width
            && self.fingerprint == fingerprint
            && self.heights.len() == messages.len()
        {
            return;
        }

        self.heights = messages
            .iter()
            .map(|m| MessageCard::calculate_height(m, content_width))
            .collect();
        self.rebuild_prefix_heights();
        self.message_count = messages.len();
        self.content_width = content_width;
        self.fingerprint = fingerprint;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u32, |acc, &h| {
                *acc = acc.saturating_add(u32::from(h));
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u32 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Top edge of card `index`.
    pub fn top_of(&self, index: usize) -> u32 {
        match index {
            0 => 0,
            i => self.prefix_heights.get(i - 1).copied().unwrap_or(0),
        }
    }

    /// Cards overlapping the viewport, plus half a viewport either side.
    pub fn visible_range(&self, scroll_offset: u32, viewport_height: u16) -> Range<usize> {
        let viewport = u32::from(viewport_height);
        let buffer = viewport / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end.max(start)
    }
}

/// Message list view. Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [Message],
    pub loading: bool,
    pub error: Option<&'a str>,
    /// Whether keyboard focus is on the list pane
    pub focused: bool,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [Message],
        loading: bool,
        error: Option<&'a str>,
        focused: bool,
    ) -> Self {
        Self {
            state,
            messages,
            loading,
            error,
            focused,
        }
    }

    fn frame_block(&self) -> Block<'static> {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let refresh_style = if self.loading {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::Yellow)
        };

        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Line::from(Span::styled(
                LIST_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )))
            .title(Line::from(Span::styled(REFRESH_LABEL, refresh_style)).right_aligned())
            .padding(Padding::horizontal(1))
    }

    fn render_notice(frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let paragraph = Paragraph::new(text)
            .style(style)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_cards(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let state = &mut *self.state;
        state.layout.ensure(self.messages, content_width);
        state.viewport_height = area.height;
        state.offset = state.offset.min(state.max_offset());

        let visible_range = state.layout.visible_range(state.offset, area.height);
        if visible_range.is_empty() {
            return;
        }

        // Paint only the visible cards into a canvas that starts at the first one.
        let window_top = state.layout.top_of(visible_range.start);
        let window_bottom = state.layout.top_of(visible_range.end);
        let window_height = u16::try_from(window_bottom - window_top).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, window_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Never)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for i in visible_range {
            let Ok(y) = u16::try_from(state.layout.top_of(i) - window_top) else {
                break;
            };
            let height = state.layout.heights[i].min(u16::MAX - y);
            let card_rect = Rect::new(0, y, content_width, height);
            scroll_view.render_widget(MessageCard::new(&self.messages[i]), card_rect);
        }

        let local_offset = u16::try_from(state.offset - window_top).unwrap_or(u16::MAX);
        state.window_state.set_offset(Position { x: 0, y: local_offset });
        frame.render_stateful_widget(scroll_view, area, &mut state.window_state);

        Self::render_scrollbar(frame, area, state.offset, state.max_offset());
    }

    /// Scrollbar for the whole collection, not just the painted window.
    fn render_scrollbar(frame: &mut Frame, area: Rect, offset: u32, max_offset: u32) {
        if max_offset == 0 {
            return;
        }
        // ScrollbarState content_length is max scrollable position, not total rows
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(max_offset as usize)
            .position(offset as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.frame_block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Precedence: loading, then error, then content.
        if self.loading {
            Self::render_notice(frame, inner, LOADING_TEXT, Style::default().fg(Color::DarkGray));
        } else if let Some(error) = self.error {
            Self::render_notice(frame, inner, error, Style::default().fg(Color::Red));
        } else if self.messages.is_empty() {
            Self::render_notice(
                frame,
                inner,
                EMPTY_TEXT,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            );
        } else {
            self.render_cards(frame, inner);
        }
    }
}
