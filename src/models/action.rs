use std::fmt;

/// Every action the front end can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Start,
    StartMeeting,
    Track,
    Stop,
    Modify,
    Rename,
    Continue,
    Delete,
    Details,
    CalendarTrack,
    FixStart,
    Refresh,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Start => "Start",
            ActionKind::StartMeeting => "Start Meeting",
            ActionKind::Track => "Track",
            ActionKind::Stop => "Stop",
            ActionKind::Modify => "Modify",
            ActionKind::Rename => "Rename",
            ActionKind::Continue => "Continue",
            ActionKind::Delete => "Delete",
            ActionKind::Details => "Details",
            ActionKind::CalendarTrack => "Calendar Track",
            ActionKind::FixStart => "Fix Start",
            ActionKind::Refresh => "Refresh",
        }
    }

    /// Actions that need the calendar tool
    pub fn uses_calendar(&self) -> bool {
        matches!(
            self,
            ActionKind::StartMeeting | ActionKind::CalendarTrack | ActionKind::FixStart
        )
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw text fields as typed by the user. An empty string means the
/// field was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionFields {
    pub date: String,
    pub start_time: String,
    pub stop_time: String,
    pub description: String,
    /// Selected row in the displayed task list, 0-based
    pub selected_row: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub kind: ActionKind,
    pub fields: ActionFields,
}

impl ActionRequest {
    pub fn new(kind: ActionKind, fields: ActionFields) -> Self {
        Self { kind, fields }
    }

    /// Request with no fields filled in
    pub fn bare(kind: ActionKind) -> Self {
        Self { kind, fields: ActionFields::default() }
    }
}

/// Result of processing one request.
///
/// `commands` run in order; an empty list means nothing must be executed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub commands: Vec<Vec<String>>,
    pub status: String,
    /// Read-only text for display (task details)
    pub details: Option<String>,
}

impl Outcome {
    pub fn command(argv: Vec<String>, status: impl Into<String>) -> Self {
        Self { commands: vec![argv], status: status.into(), details: None }
    }

    /// Status only; nothing to execute
    pub fn status_only(status: impl Into<String>) -> Self {
        Self { commands: Vec::new(), status: status.into(), details: None }
    }

    pub fn has_commands(&self) -> bool {
        !self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_kinds() {
        assert!(ActionKind::StartMeeting.uses_calendar());
        assert!(ActionKind::CalendarTrack.uses_calendar());
        assert!(ActionKind::FixStart.uses_calendar());
        assert!(!ActionKind::Track.uses_calendar());
    }

    #[test]
    fn test_outcome_constructors() {
        let outcome = Outcome::status_only("Refreshed");
        assert!(!outcome.has_commands());
        let outcome = Outcome::command(vec!["timew".to_string(), "stop".to_string()], "Stopped Tracking");
        assert!(outcome.has_commands());
        assert_eq!(ActionKind::StartMeeting.to_string(), "Start Meeting");
    }
}
