//! Response timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC instant as ISO-8601 with millisecond precision, e.g.
/// `2026-10-17T09:30:00.000Z`.
pub fn format_iso8601(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time, formatted for a response body.
pub fn now_iso8601() -> String {
    format_iso8601(Utc::now())
}
