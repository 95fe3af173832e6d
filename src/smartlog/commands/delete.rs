use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::logbook::Logbook;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(book: &mut Logbook<S>, ids: &[u64]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for &id in ids {
        match book.delete(id)? {
            Some(record) => {
                result.add_message(CmdMessage::success(format!("Log #{} deleted", id)));
                result.affected_records.push(record);
            }
            None => {
                result.add_message(CmdMessage::warning(format!("Log #{} not found", id)));
            }
        }
    }

    Ok(result)
}
