// Task Snapshot Store: the tracker's JSON export as an immutable task list

use std::collections::HashSet;
use log::debug;
use serde::Deserialize;
use crate::error::{BridgeError, BridgeResult};
use crate::exec::Executor;
use crate::models::TaskRecord;
use crate::utils::parse_export_timestamp;

/// Literal line the tracker prints when nothing is running
pub const NO_ACTIVE_TRACKING: &str = "There is no active time tracking.";

/// Export window used when the caller does not pick one
pub const DEFAULT_WINDOW: &str = "day";

/// One element of `timew export`. Unknown keys (annotations) are ignored.
#[derive(Debug, Deserialize)]
struct ExportEntry {
    id: i64,
    #[serde(default)]
    tags: Vec<String>,
    start: String,
    #[serde(default)]
    end: Option<String>,
}

/// Point-in-time list of tracked intervals, in export order.
/// Replaced wholesale on every refresh, never edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<TaskRecord>,
}

impl Snapshot {
    /// Build a snapshot, checking that ids are unique and that at most one
    /// record is open, in which case it must carry the lowest id.
    pub fn new(records: Vec<TaskRecord>) -> BridgeResult<Self> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id) {
                return Err(BridgeError::Export(format!("duplicate id @{}", record.id)));
            }
        }

        let open: Vec<&TaskRecord> = records.iter().filter(|r| r.is_active()).collect();
        if open.len() > 1 {
            return Err(BridgeError::Export(format!(
                "{} open intervals in one export",
                open.len()
            )));
        }
        if let Some(active) = open.first() {
            let newest = records.iter().map(|r| r.id).min().unwrap_or(active.id);
            if active.id != newest {
                return Err(BridgeError::Export(format!(
                    "open interval @{} is not the most recent",
                    active.id
                )));
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[TaskRecord] {
        &self.records
    }

    /// Number of tasks tracked in this window
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookup(&self, id: i64) -> Option<&TaskRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Display rows `(tags, duration)` in snapshot order, plus the largest
    /// number of tags on any one record.
    pub fn table_rows(&self) -> (Vec<(String, String)>, usize) {
        let rows = self
            .records
            .iter()
            .map(|record| (record.tag_list(), record.duration.to_string()))
            .collect();
        let max_tags = self.records.iter().map(|r| r.tags.len()).max().unwrap_or(0);
        (rows, max_tags)
    }
}

/// Parse the JSON array printed by `timew export`
pub fn parse_export(json: &str) -> BridgeResult<Snapshot> {
    let entries: Vec<ExportEntry> =
        serde_json::from_str(json).map_err(|e| BridgeError::Export(e.to_string()))?;

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let start = parse_export_timestamp(&entry.start)?;
        let end = entry.end.as_deref().map(parse_export_timestamp).transpose()?;
        if let Some(end) = end {
            if end < start {
                return Err(BridgeError::Export(format!("interval @{} ends before it starts", entry.id)));
            }
        }
        records.push(TaskRecord::new(entry.id, entry.tags, start, end));
    }

    Snapshot::new(records)
}

/// Fetches snapshots and tracking status from the tracker
pub struct SnapshotStore<'a> {
    executor: &'a dyn Executor,
    command: String,
}

impl<'a> SnapshotStore<'a> {
    pub fn new(executor: &'a dyn Executor, command: impl Into<String>) -> Self {
        Self { executor, command: command.into() }
    }

    /// Export and parse the given relative window (`day`, `week`, ...)
    pub fn refresh(&self, window: &str) -> BridgeResult<Snapshot> {
        let argv = vec![self.command.clone(), "export".to_string(), format!(":{}", window)];
        let output = self.executor.run_checked(&argv)?;
        let snapshot = parse_export(&output.stdout_text())?;
        debug!("snapshot :{} has {} tasks", window, snapshot.len());
        Ok(snapshot)
    }

    /// Description of what is being tracked right now, from the first line
    /// of the bare tracker command.
    pub fn active_timer(&self) -> BridgeResult<String> {
        let output = self.executor.run_checked(&[self.command.clone()])?;
        let text = output.stdout_text();
        let first = text.lines().next().unwrap_or("").trim();
        debug!("active timer line: {}", first);

        if first == NO_ACTIVE_TRACKING || first.is_empty() {
            Ok("no active time tracking".to_string())
        } else {
            let rest = first.strip_prefix("Tracking ").unwrap_or(first);
            Ok(rest.replace('"', ""))
        }
    }
}
