//! # Import/Export Codec
//!
//! Three interchange formats:
//!
//! - **JSON**: the record array, pretty-printed. Lossless.
//! - **Text**: each record as `timestamp[ | title]` followed by its content on the
//!   next lines, records separated by [`TEXT_SEPARATOR`].
//! - **CSV**: header [`CSV_HEADER`], every field double-quoted with inner quotes
//!   doubled. Line breaks inside content become single spaces, so multi-line
//!   content does not survive a CSV round trip.
//!
//! Imports never trust embedded ids. [`parse_import`] numbers the parsed records
//! sequentially from a caller-supplied start id. [`parse_backup`] is the exception:
//! it reads a JSON backup whose ids are kept verbatim, for wholesale replacement.
//!
//! The CSV reader is deliberately simple: it splits rows on every comma, so a
//! quoted field that itself contains a comma is cut short.

use crate::error::{Result, SmartlogError};
use crate::model::{null_as_empty, LogRecord};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

pub const TEXT_SEPARATOR: &str = "\n\n---\n\n";
pub const CSV_HEADER: &str = "ID,Timestamp,Title,Content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Text,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "json",
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Format of a file being imported, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Json,
    Csv,
    Text,
}

impl ImportFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => ImportFormat::Json,
            Some("csv") => ImportFormat::Csv,
            _ => ImportFormat::Text,
        }
    }
}

pub fn export(records: &[LogRecord], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Text => Ok(export_text(records)),
        ExportFormat::Csv => Ok(export_csv(records)),
    }
}

/// `smart-logger-export-YYYY-MM-DD.<ext>`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "smart-logger-export-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// `smart-logger-backup-YYYY-MM-DD.json`
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("smart-logger-backup-{}.json", date.format("%Y-%m-%d"))
}

fn export_text(records: &[LogRecord]) -> String {
    records
        .iter()
        .map(LogRecord::to_text)
        .collect::<Vec<_>>()
        .join(TEXT_SEPARATOR)
}

fn export_csv(records: &[LogRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.to_string());
    for record in records {
        let content = record.content.replace("\r\n", " ").replace('\n', " ");
        lines.push(format!(
            "{},{},{},{}",
            quote(&record.id.to_string()),
            quote(&record.timestamp),
            quote(&record.title),
            quote(&content)
        ));
    }
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn unquote(field: &str) -> String {
    let field = field.trim();
    let inner = field.strip_prefix('"').unwrap_or(field);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    inner.replace("\"\"", "\"")
}

/// Entry shape accepted from a JSON import. Any embedded id is ignored.
#[derive(Debug, Deserialize)]
struct ImportedEntry {
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    content: String,
    #[serde(default)]
    timestamp: Option<String>,
}

/// Parse an import payload into fresh records numbered from `start_id`.
///
/// `default_timestamp` fills in entries that carry none. An empty result is an
/// error, so callers never merge a no-op batch.
pub fn parse_import(
    content: &str,
    format: ImportFormat,
    start_id: u64,
    default_timestamp: &str,
) -> Result<Vec<LogRecord>> {
    let entries = match format {
        ImportFormat::Json => parse_json_entries(content)?,
        ImportFormat::Csv => parse_csv_entries(content),
        ImportFormat::Text => parse_text_entries(content),
    };

    if entries.is_empty() {
        return Err(SmartlogError::NothingToImport);
    }
    if start_id.checked_add(entries.len() as u64).is_none() {
        return Err(SmartlogError::InvalidImport(
            "Not enough ids left to number the imported logs".to_string(),
        ));
    }

    Ok(entries
        .into_iter()
        .zip(start_id..)
        .map(|(entry, id)| {
            let timestamp = entry
                .timestamp
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| default_timestamp.to_string());
            LogRecord::new(id, entry.title, entry.content, timestamp)
        })
        .collect())
}

/// Parse a JSON backup, keeping ids exactly as written.
pub fn parse_backup(content: &str) -> Result<Vec<LogRecord>> {
    let value = json_array(content)?;
    serde_json::from_value(value)
        .map_err(|e| SmartlogError::InvalidImport(format!("Malformed log entry: {}", e)))
}

fn json_array(content: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| SmartlogError::InvalidImport(format!("Not valid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(SmartlogError::InvalidImport(
            "Expected a JSON array of logs".to_string(),
        ));
    }
    Ok(value)
}

fn parse_json_entries(content: &str) -> Result<Vec<ImportedEntry>> {
    let value = json_array(content)?;
    serde_json::from_value(value)
        .map_err(|e| SmartlogError::InvalidImport(format!("Malformed log entry: {}", e)))
}

fn parse_csv_entries(content: &str) -> Vec<ImportedEntry> {
    content
        .split('\n')
        .skip(1)
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let columns: Vec<&str> = line.split(',').collect();
            let field = |i: usize| columns.get(i).map(|c| unquote(c)).unwrap_or_default();
            ImportedEntry {
                timestamp: Some(field(1)),
                title: field(2),
                content: field(3),
            }
        })
        .collect()
}

fn parse_text_entries(content: &str) -> Vec<ImportedEntry> {
    let normalized = content.replace("\r\n", "\n");
    normalized
        .split(TEXT_SEPARATOR)
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let mut lines = chunk.split('\n');
            let header = lines.next().unwrap_or_default();
            let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();

            let (timestamp, title) = match header.split_once('|') {
                Some((ts, title)) => (ts.trim().to_string(), title.trim().to_string()),
                None => (header.to_string(), String::new()),
            };
            ImportedEntry {
                title,
                content: body,
                timestamp: Some(timestamp),
            }
        })
        .collect()
}
