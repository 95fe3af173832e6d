use crate::codec::{self, ExportFormat};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SmartlogError};
use crate::logbook::Logbook;
use crate::store::KeyValueStore;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Write every log to `destination`, or to a dated file in `default_dir`.
pub fn run<S: KeyValueStore>(
    book: &Logbook<S>,
    format: ExportFormat,
    destination: Option<PathBuf>,
    default_dir: &Path,
) -> Result<CmdResult> {
    let path = destination.unwrap_or_else(|| {
        default_dir.join(codec::export_file_name(format, Local::now().date_naive()))
    });
    let content = render(book, format)?;
    fs::write(&path, content).map_err(SmartlogError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} logs as {} to {}",
        book.len(),
        format,
        path.display()
    )));
    Ok(result.with_written_path(path))
}

pub fn render<S: KeyValueStore>(book: &Logbook<S>, format: ExportFormat) -> Result<String> {
    codec::export(book.all(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogRecord;
    use crate::store::memory::fixtures::StoreFixture;

    fn book() -> Logbook<crate::store::memory::InMemoryStore> {
        let fixture =
            StoreFixture::new().with_records(&[LogRecord::new(1, "Title", "Body", "today")]);
        Logbook::open(fixture.store)
    }

    #[test]
    fn writes_dated_file_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&book(), ExportFormat::Csv, None, dir.path()).unwrap();

        let path = result.written_path.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("smart-logger-export-"));
        assert!(name.ends_with(".csv"));

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(codec::CSV_HEADER));
        assert!(written.contains(r#""Title","Body""#));
    }

    #[test]
    fn writes_to_explicit_destination() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");
        run(&book(), ExportFormat::Text, Some(target.clone()), dir.path()).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "today | Title\nBody");
    }
}
