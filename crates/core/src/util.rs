// Small shared utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Uppercase the first character of `s`, leaving the rest unchanged.
/// The empty string maps to the empty string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format an instant as ISO-8601 with millisecond precision and a `Z`
/// suffix, e.g. `2026-08-29T12:00:00.000Z`.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
