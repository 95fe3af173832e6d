use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::logbook::Logbook;
use crate::store::KeyValueStore;

pub fn run<S: KeyValueStore>(
    book: &mut Logbook<S>,
    title: &str,
    content: &str,
) -> Result<CmdResult> {
    let record = book.create(title, content)?;

    let mut result = CmdResult::default();
    let label = if record.title.is_empty() {
        String::new()
    } else {
        format!(": {}", record.title)
    };
    result.add_message(CmdMessage::success(format!(
        "Log #{} added{}",
        record.id, label
    )));
    Ok(result.with_affected_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SmartlogError;
    use crate::logbook::LogbookOptions;
    use crate::store::memory::InMemoryStore;

    fn book() -> Logbook<InMemoryStore> {
        let options = LogbookOptions {
            seed_on_first_run: false,
            ..LogbookOptions::default()
        };
        Logbook::open_with(InMemoryStore::new(), &options)
    }

    #[test]
    fn reports_created_record() {
        let mut book = book();
        let result = run(&mut book, "Standup", "notes").unwrap();
        assert_eq!(result.affected_records.len(), 1);
        assert_eq!(result.affected_records[0].id, 1);
        assert_eq!(result.messages[0].content, "Log #1 added: Standup");
    }

    #[test]
    fn untitled_message_has_no_suffix() {
        let mut book = book();
        let result = run(&mut book, "", "just content").unwrap();
        assert_eq!(result.messages[0].content, "Log #1 added");
    }

    #[test]
    fn blank_input_is_rejected() {
        let mut book = book();
        let err = run(&mut book, " ", "\t").unwrap_err();
        assert!(matches!(err, SmartlogError::EmptyRecord));
        assert_eq!(book.next_id(), 1);
    }
}
