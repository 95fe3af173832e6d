use crate::error::{Result, SmartlogError};
use crate::model::LogRecord;
use std::io::Write;
use std::process::{Command, Stdio};

/// Copies text to the system clipboard by piping it into the platform tool:
/// `pbcopy` on macOS, `xclip` (falling back to `xsel`) on Linux, `clip` on Windows.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        pipe_to("pbcopy", &[], text)
    }

    #[cfg(target_os = "linux")]
    {
        pipe_to("xclip", &["-selection", "clipboard"], text)
            .or_else(|_| pipe_to("xsel", &["--clipboard", "--input"], text))
    }

    #[cfg(target_os = "windows")]
    {
        pipe_to("clip", &[], text)
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        let _ = text;
        Err(SmartlogError::Api(
            "Clipboard not supported on this platform".to_string(),
        ))
    }
}

#[allow(dead_code)]
fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| SmartlogError::Api(format!("Failed to spawn {}: {}", program, e)))?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| SmartlogError::Api(format!("Failed to write to {}: {}", program, e)))?;
    }

    let status = child
        .wait()
        .map_err(|e| SmartlogError::Api(format!("Failed to wait for {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(SmartlogError::Api(format!("{} exited with error", program)))
    }
}

/// Same layout as one entry of the text export: `timestamp[ | title]` and the content below.
pub fn format_for_clipboard(record: &LogRecord) -> String {
    record.to_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for_clipboard_full() {
        let record = LogRecord::new(1, "My Title", "Some content", "9/1/2025 8:00:00 AM");
        assert_eq!(
            format_for_clipboard(&record),
            "9/1/2025 8:00:00 AM | My Title\nSome content"
        );
    }

    #[test]
    fn test_format_for_clipboard_timestamp_only() {
        let record = LogRecord::new(1, "", "", "9/1/2025 8:00:00 AM");
        assert_eq!(format_for_clipboard(&record), "9/1/2025 8:00:00 AM");
    }
}
