use chrono::Local;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Write;

/// US-style local time, e.g. `3/14/2025 9:05:12 AM`. Contains no comma, so stamps
/// survive the CSV reader's plain comma split.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p";

/// A single log entry.
///
/// The `timestamp` is captured once, at creation, in a human-readable form and is
/// never parsed back: from then on it is an opaque display and search string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub timestamp: String,
}

/// Reads a JSON `null` string field as empty.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The counter value that follows `records`: highest id plus one, or 1 when empty.
/// `None` when the highest id is already `u64::MAX`.
pub fn next_id_after<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> Option<u64> {
    match records.into_iter().map(|r| r.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

impl LogRecord {
    pub fn new(
        id: u64,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The `timestamp[ | title]` line used by the text export and the clipboard.
    pub fn header_line(&self) -> String {
        if self.title.is_empty() {
            self.timestamp.clone()
        } else {
            format!("{} | {}", self.timestamp, self.title)
        }
    }

    /// The header line, then the content on the following lines if there is any.
    pub fn to_text(&self) -> String {
        let mut text = self.header_line();
        if !self.content.is_empty() {
            text.push('\n');
            text.push_str(&self.content);
        }
        text
    }
}

/// Formats the current local time with a strftime pattern.
///
/// An invalid pattern falls back to [`DEFAULT_TIMESTAMP_FORMAT`] instead of panicking.
pub fn local_timestamp(format: &str) -> String {
    let now = Local::now();
    let mut out = String::new();
    if write!(out, "{}", now.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "invalid timestamp format, using default");
    now.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
}

/// The two sample entries written on first run, and the counter that follows them.
pub fn seed_records(timestamp: &str) -> (Vec<LogRecord>, u64) {
    let records = vec![
        LogRecord::new(
            1,
            "Welcome to Smart Logger v2",
            "This is your first log entry. The app is working correctly!",
            timestamp,
        ),
        LogRecord::new(
            2,
            "Test Entry",
            "This is a test entry to verify the display functionality.",
            timestamp,
        ),
    ];
    (records, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_line_omits_empty_title() {
        let record = LogRecord::new(1, "", "body", "1/1/2025 10:00:00 AM");
        assert_eq!(record.header_line(), "1/1/2025 10:00:00 AM");

        let record = LogRecord::new(1, "Standup", "", "1/1/2025 10:00:00 AM");
        assert_eq!(record.header_line(), "1/1/2025 10:00:00 AM | Standup");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: LogRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(record, LogRecord::new(7, "", "", ""));
    }

    #[test]
    fn null_fields_read_as_empty() {
        let record: LogRecord =
            serde_json::from_str(r#"{"id": 3, "title": null, "content": null}"#).unwrap();
        assert_eq!(record, LogRecord::new(3, "", "", ""));
    }

    #[test]
    fn next_id_after_highest() {
        assert_eq!(next_id_after(&Vec::new()), Some(1));
        let records = vec![LogRecord::new(4, "", "", ""), LogRecord::new(2, "", "", "")];
        assert_eq!(next_id_after(&records), Some(5));
        assert_eq!(next_id_after(&[LogRecord::new(u64::MAX, "", "", "")]), None);
    }

    #[test]
    fn default_format_has_no_comma() {
        let stamp = local_timestamp(DEFAULT_TIMESTAMP_FORMAT);
        assert!(!stamp.contains(','));
    }

    #[test]
    fn seed_has_two_records_and_counter_three() {
        let (records, next_id) = seed_records("now");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
        assert_eq!(next_id, 3);
    }

    #[test]
    fn invalid_format_falls_back() {
        let stamp = local_timestamp("%Q");
        assert!(!stamp.is_empty());
    }
}
