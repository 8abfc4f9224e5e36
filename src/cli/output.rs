// Output formatting for the terminal front end

use std::io::IsTerminal;
use crate::models::CalendarEntry;
use crate::snapshot::Snapshot;

const ANSI_BOLD: &str = "\x1b[1m";
const ANSI_RESET: &str = "\x1b[0m";

/// Longest tag text shown before truncation
const MAX_TAG_WIDTH: usize = 40;

/// Check if stdout is a terminal (TTY)
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Apply bold formatting if in TTY mode
fn bold_if_tty(text: &str, is_tty: bool) -> String {
    if is_tty {
        format!("{}{}{}", ANSI_BOLD, text, ANSI_RESET)
    } else {
        text.to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        text.to_string()
    }
}

/// Quote an argument for display when it would not survive a shell as-is
fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("'{}'", arg.replace('\'', "'\\''"))
    } else {
        arg.to_string()
    }
}

/// Render an argument vector as a copy-pasteable command line
pub fn format_command(argv: &[String]) -> String {
    argv.iter().map(|arg| quote_arg(arg)).collect::<Vec<_>>().join(" ")
}

/// Task list in snapshot order. Row numbers are what `--row` expects.
pub fn format_task_table(snapshot: &Snapshot, is_tty: bool) -> String {
    if snapshot.is_empty() {
        return "No tasks tracked today.".to_string();
    }

    let (rows, _) = snapshot.table_rows();
    let row_width = 3.max(snapshot.len().saturating_sub(1).to_string().len());
    let id_width = 3.max(snapshot.records().iter().map(|r| r.id.to_string().len() + 1).max().unwrap_or(0));
    let tag_width = 3.max(rows.iter().map(|(tags, _)| tags.chars().count().min(MAX_TAG_WIDTH)).max().unwrap_or(0));

    let header = format!(
        "{:<row$} {:<id$} {:<tag$} {}",
        "Row", "ID", "Tag", "Duration",
        row = row_width,
        id = id_width,
        tag = tag_width
    );
    let mut output = bold_if_tty(header.trim_end(), is_tty);
    output.push('\n');
    output.push_str(&"-".repeat(row_width + id_width + tag_width + 3 + "Duration".len()));
    output.push('\n');

    for (index, (record, (tags, duration))) in snapshot.records().iter().zip(rows.iter()).enumerate() {
        let line = format!(
            "{:<row$} {:<id$} {:<tag$} {}",
            index,
            format!("@{}", record.id),
            truncate(tags, MAX_TAG_WIDTH),
            duration,
            row = row_width,
            id = id_width,
            tag = tag_width
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output.trim_end().to_string()
}

/// Numbered list of calendar entries for the selection prompt
pub fn format_calendar_entries(entries: &[CalendarEntry]) -> String {
    let title_width = 3.max(entries.iter().map(|e| e.title.chars().count()).max().unwrap_or(0));
    let mut output = format!("{:<3} {:<width$} {:<5} {}\n", "#", "Tag", "Start", "Stop", width = title_width);
    for (index, entry) in entries.iter().enumerate() {
        output.push_str(&format!(
            "{:<3} {:<width$} {:<5} {}\n",
            index,
            entry.title,
            entry.start,
            entry.end,
            width = title_width
        ));
    }
    output
}
