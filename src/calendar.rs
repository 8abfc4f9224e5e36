// Calendar Bridge: events from icalBuddy as task sources

use log::{debug, error};
use crate::config::Settings;
use crate::error::{BridgeError, BridgeResult};
use crate::exec::Executor;
use crate::models::CalendarEntry;
use crate::utils::is_valid_time;

/// Separator between start and end time in the calendar tool's output
pub const TIME_RANGE_SEPARATOR: &str = " - ";

const EXCLUDE_DEFAULT: &str = "url,location,notes,attendees";
const EXCLUDE_WITH_DATETIME: &str = "url,location,notes,attendees,datetime";

/// Split calendar output into entries.
///
/// Each line must be exactly `title <sep> start - end`. Anything else is
/// logged and skipped; blank lines are skipped silently.
pub fn parse_entries(text: &str, separator: &str) -> Vec<CalendarEntry> {
    let mut entries = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(separator).collect();
        let times: Vec<&str> = match fields.as_slice() {
            [_, range] => range.split(TIME_RANGE_SEPARATOR).collect(),
            _ => Vec::new(),
        };
        match (fields.as_slice(), times.as_slice()) {
            ([title, _], [start, end]) => {
                entries.push(CalendarEntry::new(title.trim(), start.trim(), end.trim()));
            }
            _ => error!("Skipping calendar entry with unexpected format: {}", line),
        }
    }

    debug!("calendar entries: {:?}", entries);
    entries
}

pub struct CalendarBridge<'a> {
    executor: &'a dyn Executor,
    command: String,
    calendar: String,
    separator: String,
}

impl<'a> CalendarBridge<'a> {
    pub fn new(
        executor: &'a dyn Executor,
        command: impl Into<String>,
        calendar: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            command: command.into(),
            calendar: calendar.into(),
            separator: separator.into(),
        }
    }

    pub fn from_settings(executor: &'a dyn Executor, settings: &Settings) -> Self {
        Self::new(
            executor,
            settings.calendar_command.clone(),
            settings.calendar_name.clone(),
            settings.calendar_separator.clone(),
        )
    }

    /// Argument vector for one query. `range` is `eventsNow` or `eventsToday`.
    pub fn command_line(&self, range: &str, exclude_fields: &str) -> Vec<String> {
        vec![
            self.command.clone(),
            "-npn".to_string(),
            "-ea".to_string(),
            "-nc".to_string(),
            "-b".to_string(),
            String::new(),
            "-ps".to_string(),
            // icalBuddy reads the first character as the list delimiter
            format!("\"{}\"", self.separator),
            "-eep".to_string(),
            exclude_fields.to_string(),
            "-ic".to_string(),
            self.calendar.clone(),
            range.to_string(),
        ]
    }

    fn query(&self, range: &str, exclude_fields: &str) -> BridgeResult<String> {
        let output = self.executor.run_checked(&self.command_line(range, exclude_fields))?;
        Ok(output.stdout_text())
    }

    /// Title of the event happening now; empty when there is none
    pub fn current_entry(&self) -> BridgeResult<String> {
        let text = self.query("eventsNow", EXCLUDE_WITH_DATETIME)?;
        Ok(text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("")
            .to_string())
    }

    /// Start time of the event happening now. The line must have the same
    /// `title <sep> start - end` shape `parse_entries` accepts.
    pub fn current_start_time(&self) -> BridgeResult<String> {
        let text = self.query("eventsNow", EXCLUDE_DEFAULT)?;
        let line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
        if line.is_empty() {
            return Err(BridgeError::NothingScheduled);
        }

        let start = parse_entries(line, &self.separator)
            .into_iter()
            .next()
            .map(|entry| entry.start)
            .filter(|start| is_valid_time(start))
            .ok_or_else(|| BridgeError::Calendar(format!("no start time in '{}'", line)))?;
        debug!("start_time: {}", start);
        Ok(start)
    }

    /// Today's events in calendar order
    pub fn list_today(&self) -> BridgeResult<Vec<CalendarEntry>> {
        let text = self.query("eventsToday", EXCLUDE_DEFAULT)?;
        Ok(parse_entries(&text, &self.separator))
    }
}
