use crate::clipboard::format_for_clipboard;
use crate::commands::CmdResult;
use crate::error::Result;
use crate::logbook::Logbook;
use crate::store::KeyValueStore;

/// Resolve a log and prepare its clipboard text. Handing the text to the
/// platform clipboard is left to the caller.
pub fn run<S: KeyValueStore>(book: &Logbook<S>, id: u64) -> Result<CmdResult> {
    let record = book.find(id)?.clone();
    let mut result = CmdResult {
        clipboard_text: Some(format_for_clipboard(&record)),
        ..CmdResult::default()
    };
    result.affected_records.push(record);
    Ok(result)
}
