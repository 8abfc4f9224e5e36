use chrono::{DateTime, Duration, Utc};
use std::fmt;
use crate::utils::format_elapsed;

/// Length of a tracked interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDuration {
    Closed(Duration),
    /// Interval still running
    Active,
}

impl TaskDuration {
    pub fn is_active(&self) -> bool {
        matches!(self, TaskDuration::Active)
    }
}

impl fmt::Display for TaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskDuration::Closed(elapsed) => write!(f, "{}", format_elapsed(*elapsed)),
            TaskDuration::Active => write!(f, "Active"),
        }
    }
}

/// One tracked interval as reported by the tracker.
///
/// `id` is the tracker's own numbering: 1 is the most recent interval and
/// the number grows going back in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i64,
    /// Never empty; the first tag is the display name
    pub tags: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub duration: TaskDuration,
}

impl TaskRecord {
    /// Build a record, deriving the duration from the interval bounds.
    /// An empty tag list is replaced by a single empty tag.
    pub fn new(id: i64, tags: Vec<String>, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        let tags = if tags.is_empty() { vec![String::new()] } else { tags };
        let duration = match end {
            Some(end) => TaskDuration::Closed(end - start),
            None => TaskDuration::Active,
        };
        Self { id, tags, start, end, duration }
    }

    /// First tag, used as the task description by rename
    pub fn name(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("")
    }

    /// All tags joined for display
    pub fn tag_list(&self) -> String {
        self.tags.join(", ")
    }

    pub fn is_active(&self) -> bool {
        self.end.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_closed_duration() {
        let record = TaskRecord::new(2, vec!["Write spec".to_string()], at(9, 0), Some(at(10, 30)));
        assert_eq!(record.duration, TaskDuration::Closed(Duration::minutes(90)));
        assert_eq!(record.duration.to_string(), "1:30:00");
        assert!(!record.is_active());
    }

    #[test]
    fn test_active_duration() {
        let record = TaskRecord::new(1, vec!["Standup".to_string()], at(9, 0), None);
        assert!(record.duration.is_active());
        assert_eq!(record.duration.to_string(), "Active");
        assert!(record.is_active());
    }

    #[test]
    fn test_tags_default_and_display() {
        let record = TaskRecord::new(1, Vec::new(), at(9, 0), None);
        assert_eq!(record.tags, vec![String::new()]);
        assert_eq!(record.name(), "");

        let record = TaskRecord::new(1, vec!["Review".to_string(), "work".to_string()], at(9, 0), None);
        assert_eq!(record.name(), "Review");
        assert_eq!(record.tag_list(), "Review, work");
    }
}
