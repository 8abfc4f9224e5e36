// Action Dispatcher: request in, commands and status out

use log::{debug, error, warn};
use crate::builder::*;
use crate::calendar::CalendarBridge;
use crate::config::Settings;
use crate::error::{BridgeError, BridgeResult};
use crate::exec::Executor;
use crate::models::{ActionKind, ActionRequest, CalendarChoice, CalendarEntry, Outcome};
use crate::resolve::{resolve, Resolved};
use crate::snapshot::{Snapshot, SnapshotStore, DEFAULT_WINDOW};
use crate::validate::validate_request;

/// Modal questions the front end answers on behalf of the user
pub trait Prompter {
    /// Ask for a line of text, pre-filled with `default`. `None` = canceled.
    fn prompt_text(&mut self, title: &str, default: &str) -> Option<String>;

    /// Let the user pick one of today's calendar entries
    fn select_calendar_entry(&mut self, entries: &[CalendarEntry]) -> CalendarChoice;
}

pub struct Dispatcher<'a> {
    executor: &'a dyn Executor,
    settings: &'a Settings,
}

impl<'a> Dispatcher<'a> {
    pub fn new(executor: &'a dyn Executor, settings: &'a Settings) -> Self {
        Self { executor, settings }
    }

    pub fn snapshots(&self) -> SnapshotStore<'a> {
        SnapshotStore::new(self.executor, self.settings.tracker_command.clone())
    }

    pub fn calendar(&self) -> CalendarBridge<'a> {
        CalendarBridge::from_settings(self.executor, self.settings)
    }

    /// Fresh snapshot plus the interval the selection points at
    fn target(&self, selected_row: Option<usize>) -> BridgeResult<(Snapshot, Resolved)> {
        let snapshot = self.snapshots().refresh(DEFAULT_WINDOW)?;
        let target = resolve(selected_row, snapshot.len())?;
        debug!("task_no: {} row: {}", target.task_id, target.row);
        Ok((snapshot, target))
    }

    /// Validate, resolve and build. Only calendar and export queries run
    /// here; the returned commands are left for the caller.
    pub fn dispatch(&self, request: &ActionRequest, prompter: &mut dyn Prompter) -> BridgeResult<Outcome> {
        validate_request(request)?;
        if request.kind.uses_calendar() && !self.settings.calendar_enabled {
            return Err(BridgeError::invalid("Calendar integration is disabled"));
        }

        let base = self.settings.tracker_command.as_str();
        let fields = &request.fields;

        match request.kind {
            ActionKind::Start => Ok(build_start(base, fields)),
            ActionKind::Track => build_track(base, fields),
            ActionKind::Stop => Ok(build_stop(base, fields)),
            ActionKind::Modify => {
                let (_, target) = self.target(fields.selected_row)?;
                build_modify(base, fields, target)
            }
            ActionKind::Rename => {
                let (snapshot, target) = self.target(fields.selected_row)?;
                let record = snapshot
                    .lookup(target.task_id)
                    .ok_or(BridgeError::TaskNotFound(target.task_id))?;
                let new_description = prompter.prompt_text("Rename Task", record.name());
                build_rename(base, record, new_description.as_deref())
            }
            ActionKind::Continue => {
                let (_, target) = self.target(fields.selected_row)?;
                Ok(build_continue(base, target))
            }
            ActionKind::Delete => {
                let (_, target) = self.target(fields.selected_row)?;
                Ok(build_delete(base, target))
            }
            ActionKind::Details => {
                let (snapshot, target) = self.target(fields.selected_row)?;
                let record = snapshot
                    .lookup(target.task_id)
                    .ok_or(BridgeError::TaskNotFound(target.task_id))?;
                Ok(build_details(record))
            }
            ActionKind::StartMeeting => {
                let entry = self.calendar().current_entry()?;
                build_start_meeting(base, &entry)
            }
            ActionKind::FixStart => {
                let start_time = self.calendar().current_start_time()?;
                Ok(build_fix_start(base, &start_time))
            }
            ActionKind::CalendarTrack => {
                let entries = self.calendar().list_today()?;
                if entries.is_empty() {
                    return Err(BridgeError::NothingScheduled);
                }
                let choice = prompter.select_calendar_entry(&entries);
                build_calendar_track(base, &entries, choice)
            }
            ActionKind::Refresh => Ok(build_refresh()),
        }
    }

    /// Like `dispatch`, but every failure becomes a status-only outcome
    pub fn handle(&self, request: &ActionRequest, prompter: &mut dyn Prompter) -> Outcome {
        match self.dispatch(request, prompter) {
            Ok(outcome) => outcome,
            Err(e) => {
                if e.is_user_error() {
                    warn!("{} rejected: {}", request.kind, e);
                } else {
                    error!("{} failed: {}", request.kind, e);
                }
                Outcome::status_only(format!("Error: {}", e))
            }
        }
    }

    /// Run an outcome's commands in order, stopping at the first failure.
    /// Returns the tracker's combined stdout.
    pub fn execute(&self, outcome: &Outcome) -> BridgeResult<String> {
        let mut output = String::new();
        for argv in &outcome.commands {
            let result = self.executor.run_checked(argv)?;
            output.push_str(&result.stdout_text());
        }
        Ok(output)
    }
}
