// Terminal answers to the dispatcher's modal questions

use std::io::{self, BufRead, Write};
use log::warn;
use crate::cli::output::format_calendar_entries;
use crate::dispatch::Prompter;
use crate::models::{CalendarChoice, CalendarEntry};

/// Reads answers line by line. Answers given up front on the command line
/// (`--to`, `--pick`) are used without asking.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    rename_to: Option<String>,
    pick: Option<usize>,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, rename_to: None, pick: None }
    }

    pub fn with_rename_to(mut self, rename_to: Option<String>) -> Self {
        self.rename_to = rename_to;
        self
    }

    pub fn with_pick(mut self, pick: Option<usize>) -> Self {
        self.pick = pick;
        self
    }

    /// One trimmed line, `None` at end of input
    fn read_answer(&mut self, question: &str) -> Option<String> {
        let _ = write!(self.writer, "{}", question);
        let _ = self.writer.flush();
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn prompt_text(&mut self, title: &str, default: &str) -> Option<String> {
        if let Some(answer) = self.rename_to.take() {
            return Some(answer);
        }
        let answer = self.read_answer(&format!("{} [{}]: ", title, default))?;
        if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }

    fn select_calendar_entry(&mut self, entries: &[CalendarEntry]) -> CalendarChoice {
        if let Some(index) = self.pick.take() {
            return CalendarChoice::Selected(index);
        }
        let _ = write!(self.writer, "{}", format_calendar_entries(entries));
        match self.read_answer("Entry to track (number, empty for none, q to cancel): ") {
            None => CalendarChoice::Canceled,
            Some(answer) if answer.eq_ignore_ascii_case("q") => CalendarChoice::Canceled,
            Some(answer) if answer.is_empty() => CalendarChoice::NothingSelected,
            Some(answer) => match answer.parse::<usize>() {
                Ok(index) => CalendarChoice::Selected(index),
                Err(_) => {
                    warn!("Not an entry number: {}", answer);
                    CalendarChoice::NothingSelected
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn entries() -> Vec<CalendarEntry> {
        vec![CalendarEntry::new("Standup", "09:00", "09:15")]
    }

    #[test]
    fn test_rename_prompt() {
        assert_eq!(prompter("Write design\n").prompt_text("Rename Task", "Write spec"), Some("Write design".to_string()));
        assert_eq!(prompter("\n").prompt_text("Rename Task", "Write spec"), Some("Write spec".to_string()));
        assert_eq!(prompter("").prompt_text("Rename Task", "Write spec"), None);
    }

    #[test]
    fn test_rename_preset_skips_prompt() {
        let mut p = prompter("").with_rename_to(Some("Lunch".to_string()));
        assert_eq!(p.prompt_text("Rename Task", "Review"), Some("Lunch".to_string()));
        assert!(p.writer.is_empty());
    }

    #[test]
    fn test_calendar_selection() {
        assert_eq!(prompter("0\n").select_calendar_entry(&entries()), CalendarChoice::Selected(0));
        assert_eq!(prompter("\n").select_calendar_entry(&entries()), CalendarChoice::NothingSelected);
        assert_eq!(prompter("q\n").select_calendar_entry(&entries()), CalendarChoice::Canceled);
        assert_eq!(prompter("").select_calendar_entry(&entries()), CalendarChoice::Canceled);
        assert_eq!(prompter("first\n").select_calendar_entry(&entries()), CalendarChoice::NothingSelected);
        assert_eq!(prompter("").with_pick(Some(0)).select_calendar_entry(&entries()), CalendarChoice::Selected(0));
    }

    #[test]
    fn test_calendar_prompt_lists_entries() {
        let mut p = prompter("0\n");
        p.select_calendar_entry(&entries());
        let shown = String::from_utf8(p.writer).unwrap();
        assert!(shown.contains("Standup"));
        assert!(shown.contains("Entry to track"));
    }
}
