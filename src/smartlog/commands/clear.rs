use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::logbook::Logbook;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(book: &mut Logbook<S>) -> Result<CmdResult> {
    let count = book.clear_all()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "All logs cleared ({} removed)",
        count
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn clears_seeded_book() {
        let mut book = Logbook::open(InMemoryStore::new());
        let result = run(&mut book).unwrap();
        assert!(book.is_empty());
        assert_eq!(book.next_id(), 1);
        assert_eq!(result.messages[0].content, "All logs cleared (2 removed)");
    }
}
