//! History path conventions.
//!
//! Pure string functions. These define the canonical layout of assessment
//! records under a history root directory.

use uuid::Uuid;

pub const HISTORY_PREFIX: &str = "history/";

/// Map a user identifier (usually an email) to a single path segment.
///
/// Percent-encoded, so distinct ids never share a segment. Encoding leaves
/// dots alone; dot-only ids have them escaped so the segment never names
/// `.` or `..`, and the empty id maps to a lone `%`, which no encoding of a
/// non-empty id produces.
pub fn user_segment(user: &str) -> String {
    if user.is_empty() {
        return "%".to_string();
    }
    if user.chars().all(|c| c == '.') {
        return "%2E".repeat(user.len());
    }
    urlencoding::encode(user).into_owned()
}

pub fn user_history_prefix(user: &str) -> String {
    format!("{HISTORY_PREFIX}{}/", user_segment(user))
}

/// Record file names sort by creation time: a zero-padded millisecond
/// timestamp followed by the record id.
pub fn record(user: &str, created_at: jiff::Timestamp, id: Uuid) -> String {
    format!(
        "{}{:020}-{id}.json",
        user_history_prefix(user),
        created_at.as_millisecond().max(0)
    )
}

/// Creation time encoded in a record key, in milliseconds since the epoch.
pub fn record_millis(key: &str) -> Option<i64> {
    let name = key.rsplit('/').next()?;
    let (millis, rest) = name.split_once('-')?;
    if !rest.ends_with(".json") {
        return None;
    }
    millis.parse().ok()
}
