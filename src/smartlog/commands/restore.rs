use crate::codec;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SmartlogError};
use crate::logbook::Logbook;
use crate::store::KeyValueStore;
use std::fs;
use std::path::Path;

/// Replace every log with the contents of a JSON backup, keeping its ids.
pub fn run<S: KeyValueStore>(book: &mut Logbook<S>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(SmartlogError::Io)?;
    restore_content(book, &content)
}

pub fn restore_content<S: KeyValueStore>(
    book: &mut Logbook<S>,
    content: &str,
) -> Result<CmdResult> {
    let records = codec::parse_backup(content)?;
    let count = records.len();
    book.replace_all(records)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Loaded {} logs from file (next id: {})",
        count,
        book.next_id()
    )));
    Ok(result)
}
