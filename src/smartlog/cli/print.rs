use colored::Colorize;
use smartlog::api::{CmdMessage, MessageLevel};
use smartlog::model::LogRecord;
use smartlog::view::{highlight, View};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 6;
const PREVIEW_CHARS: usize = 60;

// Private-use sentinels wrapped around search hits before styling.
const MARK_OPEN: &str = "\u{e000}";
const MARK_CLOSE: &str = "\u{e001}";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub fn print_view(view: &View, term: &str, expand: bool) {
    if view.entries.is_empty() {
        println!("{}", "No logs available. Add your first log!".dimmed());
        return;
    }

    for entry in view.visible() {
        let record = &entry.record;
        let id_str = format!("#{:<width$}", record.id, width = ID_WIDTH - 1);

        let header = if expand {
            record.header_line()
        } else {
            let preview: String = record
                .content
                .chars()
                .take(PREVIEW_CHARS)
                .map(|c| if c == '\n' { ' ' } else { c })
                .collect();
            if preview.is_empty() {
                record.header_line()
            } else {
                format!("{}  {}", record.header_line(), preview)
            }
        };
        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + 1);
        let header = truncate_to_width(&header, available);

        println!("{} {}", id_str.yellow(), emphasize(&header, term));

        if expand {
            print_content(record, term);
            println!();
        }
    }
}

pub fn print_full_record(record: &LogRecord) {
    println!(
        "{} {}",
        format!("#{}", record.id).yellow(),
        record.header_line().bold()
    );
    println!("--------------------------------");
    print_content(record, "");
}

fn print_content(record: &LogRecord, term: &str) {
    if record.content.is_empty() {
        println!("    {}", "No content".italic().dimmed());
        return;
    }
    for line in record.content.lines() {
        println!("    {}", emphasize(line, term));
    }
}

/// Highlight every hit of `term` in `text` for the terminal.
fn emphasize(text: &str, term: &str) -> String {
    let marked = highlight(text, term, MARK_OPEN, MARK_CLOSE);
    let mut parts = marked.split(MARK_OPEN);
    let mut out = parts.next().unwrap_or_default().to_string();
    for part in parts {
        match part.split_once(MARK_CLOSE) {
            Some((hit, rest)) => {
                out.push_str(&hit.black().on_yellow().to_string());
                out.push_str(rest);
            }
            None => out.push_str(part),
        }
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_lines_with_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert_eq!(out, "abcd…");
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn emphasize_without_term_is_identity() {
        assert_eq!(emphasize("plain text", ""), "plain text");
    }

    #[test]
    fn emphasize_leaves_no_sentinels() {
        colored::control::set_override(false);
        let out = emphasize("Alpha beta ALPHA", "alpha");
        assert_eq!(out, "Alpha beta ALPHA");
    }
}
