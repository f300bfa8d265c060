//! Display formatting for message timestamps.

use chrono::{DateTime, NaiveDateTime, Utc};

/// en-US style: short month, numeric day and year, two-digit 12-hour clock.
const DISPLAY_FORMAT: &str = "%b %-d, %Y, %I:%M %p";

/// Parses a backend timestamp into UTC.
///
/// Accepts RFC 3339 (`2024-01-01T00:00:00Z`, `...+00:00`), the Postgres text
/// form (`2024-01-01 00:00:00+00`), and naive ISO-8601, which is taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Formats `created_at` for a message card, e.g. `Jan 1, 2024, 12:00 AM`.
///
/// Always rendered in UTC so output depends only on the input. Unparseable
/// values are shown as sent.
pub fn format_created_at(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => raw.to_string(),
    }
}
