use crate::codec::{self, ExportFormat};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SmartlogError};
use crate::logbook::Logbook;
use crate::store::KeyValueStore;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Save the full collection as a JSON backup that `restore` can read back.
pub fn run<S: KeyValueStore>(
    book: &Logbook<S>,
    destination: Option<PathBuf>,
    default_dir: &Path,
) -> Result<CmdResult> {
    let path = destination
        .unwrap_or_else(|| default_dir.join(codec::backup_file_name(Local::now().date_naive())));
    let content = codec::export(book.all(), ExportFormat::Json)?;
    fs::write(&path, content).map_err(SmartlogError::Io)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Logs saved to {}",
        path.display()
    )));
    Ok(result.with_written_path(path))
}
