use crate::codec::{self, ImportFormat};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SmartlogError};
use crate::logbook::Logbook;
use crate::model::local_timestamp;
use crate::store::KeyValueStore;
use std::fs;
use std::path::Path;

/// Import a file, picking the format from its extension, and append the parsed
/// logs after the existing ones.
pub fn run<S: KeyValueStore>(book: &mut Logbook<S>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(SmartlogError::Io)?;
    let mut result = import_content(book, &content, ImportFormat::from_path(path))?;
    result.add_message(CmdMessage::info(format!("Source: {}", path.display())));
    Ok(result)
}

/// Parse `content` and append it. Nothing is merged unless the whole payload parses.
pub fn import_content<S: KeyValueStore>(
    book: &mut Logbook<S>,
    content: &str,
    format: ImportFormat,
) -> Result<CmdResult> {
    let now = local_timestamp(book.timestamp_format());
    let batch = codec::parse_import(content, format, book.next_id(), &now)?;
    let imported = batch.clone();
    let count = book.append_imported(batch)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Imported {} logs", count)));
    Ok(result.with_affected_records(imported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{export, ExportFormat};
    use crate::logbook::LogbookOptions;
    use crate::model::LogRecord;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn seeded_book() -> Logbook<InMemoryStore> {
        let fixture = StoreFixture::new().with_records(&[
            LogRecord::new(1, "one", "", "t"),
            LogRecord::new(2, "two", "", "t"),
        ]);
        Logbook::open(fixture.store)
    }

    #[test]
    fn appends_with_fresh_ids() {
        let mut book = seeded_book();
        let payload = r#"[{"id": 1, "title": "dup id", "content": "x", "timestamp": "then"}]"#;

        let result = import_content(&mut book, payload, ImportFormat::Json).unwrap();
        assert_eq!(result.affected_records[0].id, 3);

        let ids: Vec<u64> = book.all().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(book.next_id(), 4);
        assert_eq!(book.find(3).unwrap().timestamp, "then");
    }

    #[test]
    fn invalid_payload_leaves_book_untouched() {
        let mut book = seeded_book();
        let err = import_content(&mut book, r#"{"logs": 1}"#, ImportFormat::Json).unwrap_err();
        assert!(matches!(err, SmartlogError::InvalidImport(_)));
        assert_eq!(book.len(), 2);
        assert_eq!(book.next_id(), 3);
    }

    #[test]
    fn json_round_trip_into_cleared_book() {
        let mut book = seeded_book();
        book.create("Third", "multi\nline").unwrap();
        let original: Vec<(String, String, String)> = book
            .all()
            .iter()
            .map(|r| (r.title.clone(), r.content.clone(), r.timestamp.clone()))
            .collect();
        let json = export(book.all(), ExportFormat::Json).unwrap();

        book.clear_all().unwrap();
        import_content(&mut book, &json, ImportFormat::Json).unwrap();

        let restored: Vec<(String, String, String)> = book
            .all()
            .iter()
            .map(|r| (r.title.clone(), r.content.clone(), r.timestamp.clone()))
            .collect();
        assert_eq!(restored, original);
        assert_eq!(book.next_id(), 4);
    }

    #[test]
    fn csv_round_trip_of_created_record_collapses_newlines() {
        let options = LogbookOptions {
            seed_on_first_run: false,
            ..LogbookOptions::default()
        };
        let mut book = Logbook::open_with(InMemoryStore::new(), &options);
        let created = book.create("Multi", "line1\nline2").unwrap();

        let csv = export(book.all(), ExportFormat::Csv).unwrap();
        book.clear_all().unwrap();
        import_content(&mut book, &csv, ImportFormat::Csv).unwrap();

        let imported = &book.all()[0];
        assert_eq!(imported.timestamp, created.timestamp);
        assert_eq!(imported.title, "Multi");
        assert_eq!(imported.content, "line1 line2");
    }

    #[test]
    fn reads_file_and_infers_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "monday | Plan\nship it\n\n---\n\ntuesday\nreview").unwrap();

        let mut book = seeded_book();
        let result = run(&mut book, &path).unwrap();
        assert_eq!(result.affected_records.len(), 2);
        assert_eq!(book.find(3).unwrap().title, "Plan");
        assert_eq!(book.find(4).unwrap().timestamp, "tuesday");
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut book = seeded_book();
        let err = run(&mut book, Path::new("/nonexistent/smartlog.json")).unwrap_err();
        assert!(matches!(err, SmartlogError::Io(_)));
    }
}
