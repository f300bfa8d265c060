//! Layout helpers for the form's text inputs.
//!
//! Input boxes wrap by display width at character granularity (not at word
//! boundaries) so the cursor position can be derived from the text before
//! the cursor with the same function that produces the visible rows.

use unicode_width::UnicodeWidthChar;

/// Find the previous char boundary from a byte position.
pub fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

/// Find the next char boundary from a byte position.
pub fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map_or(s.len(), |c| pos + c.len_utf8())
}

/// Largest char boundary that is `<= pos`, for cursors that may point past
/// the end of a value that was replaced underneath them.
pub fn clamp_to_boundary(s: &str, pos: usize) -> usize {
    let mut pos = pos.min(s.len());
    while !s.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Split `text` into rows no wider than `width` columns. Explicit newlines
/// always start a new row. Always returns at least one row.
pub fn hard_wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut rows = vec![String::new()];
    let mut col = 0usize;

    for c in text.chars() {
        if c == '\n' {
            rows.push(String::new());
            col = 0;
            continue;
        }
        let w = c.width().unwrap_or(0);
        if col + w > width && col > 0 {
            rows.push(String::new());
            col = 0;
        }
        if let Some(row) = rows.last_mut() {
            row.push(c);
        }
        col += w;
    }
    rows
}

/// (row, column) of a cursor placed after `before`, under [`hard_wrap`].
///
/// A row that is exactly full pushes the cursor to the start of the next row.
pub fn cursor_row_col(before: &str, width: u16) -> (u16, u16) {
    let rows = hard_wrap(before, width);
    let last_row = rows.len().saturating_sub(1);
    let col: usize = rows
        .last()
        .map(|r| r.chars().map(|c| c.width().unwrap_or(0)).sum())
        .unwrap_or(0);
    if col >= usize::from(width.max(1)) {
        ((last_row + 1) as u16, 0)
    } else {
        (last_row as u16, col as u16)
    }
}
