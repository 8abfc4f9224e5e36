// Command Builder: one pure function per action kind
//
// Every builder starts a fresh argument vector from the tracker program
// name. Nothing here runs a process.

use crate::error::{BridgeError, BridgeResult};
use crate::models::{ActionFields, CalendarChoice, CalendarEntry, Outcome, TaskRecord};
use crate::resolve::Resolved;
use crate::utils::format_local_time;

fn command(base: &str, args: &[&str]) -> Vec<String> {
    std::iter::once(base)
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

/// `start [time] <desc>`
pub fn build_start(base: &str, fields: &ActionFields) -> Outcome {
    if fields.start_time.is_empty() {
        Outcome::command(
            command(base, &["start", &fields.description]),
            format!("Started: {}", fields.description),
        )
    } else {
        Outcome::command(
            command(base, &["start", &fields.start_time, &fields.description]),
            format!("Started: {} at {}", fields.description, fields.start_time),
        )
    }
}

/// `track <start> - <stop> <desc>`.
/// With a date the times are pinned to it; without one the tracker
/// assumes today.
pub fn build_track(base: &str, fields: &ActionFields) -> BridgeResult<Outcome> {
    if fields.start_time.is_empty() || fields.stop_time.is_empty() {
        return Err(BridgeError::invalid("Track needs both a start and a stop time"));
    }
    let (start, stop) = if fields.date.is_empty() {
        (fields.start_time.clone(), fields.stop_time.clone())
    } else {
        (
            format!("{}T{}", fields.date, fields.start_time),
            format!("{}T{}", fields.date, fields.stop_time),
        )
    };
    Ok(Outcome::command(
        command(base, &["track", &start, "-", &stop, &fields.description]),
        format!("Tracked: {}", fields.description),
    ))
}

/// `stop [time]`
pub fn build_stop(base: &str, fields: &ActionFields) -> Outcome {
    let argv = if fields.stop_time.is_empty() {
        command(base, &["stop"])
    } else {
        command(base, &["stop", &fields.stop_time])
    };
    Outcome::command(argv, "Stopped Tracking")
}

/// `modify {start|end} @id <time>`; exactly one of the two times must be set
pub fn build_modify(base: &str, fields: &ActionFields, target: Resolved) -> BridgeResult<Outcome> {
    let (mode, time) = match (fields.start_time.as_str(), fields.stop_time.as_str()) {
        ("", "") => return Err(BridgeError::invalid("Please enter a time")),
        (start, "") => ("start", start),
        ("", stop) => ("end", stop),
        _ => {
            return Err(BridgeError::invalid(
                "Can only change start or end time, clear one of the fields",
            ))
        }
    };
    Ok(Outcome::command(
        command(base, &["modify", mode, &target.tag(), time]),
        format!("Modified {} time to {}", mode, time),
    ))
}

/// Replace the first tag of `record`: tag with the new text, then untag
/// the old one. `None` means the user canceled the prompt.
pub fn build_rename(
    base: &str,
    record: &TaskRecord,
    new_description: Option<&str>,
) -> BridgeResult<Outcome> {
    let Some(new_description) = new_description else {
        return Ok(Outcome::status_only("Rename Canceled"));
    };
    if new_description.trim().is_empty() {
        return Err(BridgeError::invalid("Task name can not be empty"));
    }
    let old_description = record.name();
    let id = format!("@{}", record.id);

    if new_description == old_description {
        return Ok(Outcome::status_only("Name unchanged"));
    }

    let mut commands = vec![command(base, &["tag", &id, new_description])];
    // An empty first tag is a placeholder, not something the tracker holds
    if !old_description.is_empty() {
        commands.push(command(base, &["untag", &id, old_description]));
    }
    Ok(Outcome { commands, status: "Renamed task".to_string(), details: None })
}

/// `continue @id`
pub fn build_continue(base: &str, target: Resolved) -> Outcome {
    row_action(base, "continue", target)
}

/// `delete @id`
pub fn build_delete(base: &str, target: Resolved) -> Outcome {
    row_action(base, "delete", target)
}

fn row_action(base: &str, word: &str, target: Resolved) -> Outcome {
    let id = target.tag();
    Outcome::command(command(base, &[word, &id]), format!("{} {}", word, id))
}

/// `start <entry>` for whatever the calendar says is happening now
pub fn build_start_meeting(base: &str, entry: &str) -> BridgeResult<Outcome> {
    let entry = entry.trim();
    if entry.is_empty() {
        return Err(BridgeError::NothingScheduled);
    }
    Ok(Outcome::command(command(base, &["start", entry]), "Started meeting"))
}

/// Move the start of the most recent interval to the meeting's start.
/// Always `@1`, regardless of selection.
pub fn build_fix_start(base: &str, start_time: &str) -> Outcome {
    Outcome::command(
        command(base, &["modify", "start", "@1", start_time]),
        format!("Modified Start time to {}", start_time),
    )
}

/// Read-only description of one interval, no command
pub fn build_details(record: &TaskRecord) -> Outcome {
    let mut lines = vec![
        format!("Task Tag:   {}", record.tag_list()),
        format!("Start Time: {}", format_local_time(record.start)),
    ];
    if let Some(end) = record.end {
        lines.push(format!("Stop Time:  {}", format_local_time(end)));
    }
    lines.push(format!("Duration:   {}", record.duration));

    Outcome {
        commands: Vec::new(),
        status: format!("Details for @{}", record.id),
        details: Some(lines.join("\n")),
    }
}

/// Track one of today's calendar entries as it was scheduled
pub fn build_calendar_track(
    base: &str,
    entries: &[CalendarEntry],
    choice: CalendarChoice,
) -> BridgeResult<Outcome> {
    match choice {
        CalendarChoice::Selected(index) => {
            let entry = entries
                .get(index)
                .ok_or(BridgeError::RowOutOfRange { row: index, len: entries.len() })?;
            if entry.title.trim().is_empty() {
                return Err(BridgeError::invalid("Task name can not be empty"));
            }
            let fields = ActionFields {
                date: String::new(),
                start_time: entry.start.clone(),
                stop_time: entry.end.clone(),
                description: entry.title.clone(),
                selected_row: None,
            };
            build_track(base, &fields)
        }
        CalendarChoice::NothingSelected => Err(BridgeError::invalid("Must select an entry in list")),
        CalendarChoice::Canceled => Ok(Outcome::status_only("Canceled")),
    }
}

pub fn build_refresh() -> Outcome {
    Outcome::status_only("Refreshed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use chrono::{TimeZone, Utc};

    fn fields(date: &str, start: &str, stop: &str, desc: &str) -> ActionFields {
        ActionFields {
            date: date.to_string(),
            start_time: start.to_string(),
            stop_time: stop.to_string(),
            description: desc.to_string(),
            selected_row: None,
        }
    }

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn record(id: i64, tags: &[&str], closed: bool) -> TaskRecord {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let end = closed.then(|| Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
        TaskRecord::new(id, tags.iter().map(|t| t.to_string()).collect(), start, end)
    }

    #[test]
    fn test_start_without_time() {
        let outcome = build_start("timew", &fields("", "", "", "Write spec"));
        assert_eq!(outcome.commands, vec![argv(&["timew", "start", "Write spec"])]);
        assert_eq!(outcome.status, "Started: Write spec");
    }

    #[test]
    fn test_start_with_time() {
        let outcome = build_start("timew", &fields("", "08:45", "", "Write spec"));
        assert_eq!(outcome.commands, vec![argv(&["timew", "start", "08:45", "Write spec"])]);
        assert_eq!(outcome.status, "Started: Write spec at 08:45");
    }

    #[test]
    fn test_track_with_date() {
        let outcome = build_track("timew", &fields("2024-03-01", "09:00", "10:30", "Write spec")).unwrap();
        assert_eq!(
            outcome.commands,
            vec![argv(&["timew", "track", "2024-03-01T09:00", "-", "2024-03-01T10:30", "Write spec"])]
        );
        assert_eq!(outcome.status, "Tracked: Write spec");
    }

    #[test]
    fn test_track_without_date() {
        let outcome = build_track("timew", &fields("", "09:00", "10:30", "Write spec")).unwrap();
        assert_eq!(
            outcome.commands,
            vec![argv(&["timew", "track", "09:00", "-", "10:30", "Write spec"])]
        );
        assert!(build_track("timew", &fields("", "09:00", "", "Write spec")).is_err());
    }

    #[test]
    fn test_stop() {
        assert_eq!(build_stop("timew", &fields("", "", "", "")).commands, vec![argv(&["timew", "stop"])]);
        let outcome = build_stop("timew", &fields("", "", "17:30", ""));
        assert_eq!(outcome.commands, vec![argv(&["timew", "stop", "17:30"])]);
        assert_eq!(outcome.status, "Stopped Tracking");
    }

    #[test]
    fn test_modify_modes() {
        let target = resolve(Some(1), 3).unwrap();
        let outcome = build_modify("timew", &fields("", "08:00", "", ""), target).unwrap();
        assert_eq!(outcome.commands, vec![argv(&["timew", "modify", "start", "@2", "08:00"])]);
        assert_eq!(outcome.status, "Modified start time to 08:00");

        let outcome = build_modify("timew", &fields("", "", "12:00", ""), target).unwrap();
        assert_eq!(outcome.commands, vec![argv(&["timew", "modify", "end", "@2", "12:00"])]);
    }

    #[test]
    fn test_modify_rejects_both_and_neither() {
        let target = resolve(None, 3).unwrap();
        let both = build_modify("timew", &fields("", "08:00", "09:00", ""), target).unwrap_err();
        assert!(both.is_user_error());
        let neither = build_modify("timew", &fields("", "", "", ""), target).unwrap_err();
        assert_eq!(neither.to_string(), "Please enter a time");
    }

    #[test]
    fn test_rename_issues_tag_then_untag() {
        let outcome = build_rename("timew", &record(2, &["Write spec", "docs"], true), Some("Write design")).unwrap();
        assert_eq!(
            outcome.commands,
            vec![
                argv(&["timew", "tag", "@2", "Write design"]),
                argv(&["timew", "untag", "@2", "Write spec"]),
            ]
        );
        assert_eq!(outcome.status, "Renamed task");
    }

    #[test]
    fn test_rename_canceled_or_unchanged() {
        let task = record(1, &["Review"], false);
        let outcome = build_rename("timew", &task, None).unwrap();
        assert!(!outcome.has_commands());
        assert_eq!(outcome.status, "Rename Canceled");

        assert!(!build_rename("timew", &task, Some("Review")).unwrap().has_commands());
    }

    #[test]
    fn test_rename_to_blank_rejected() {
        let task = record(1, &["Review"], true);
        for blank in ["", "   "] {
            let err = build_rename("timew", &task, Some(blank)).unwrap_err();
            assert!(err.is_user_error());
            assert_eq!(err.to_string(), "Task name can not be empty");
        }
    }

    #[test]
    fn test_rename_untagged_interval() {
        let outcome = build_rename("timew", &record(1, &[], true), Some("Lunch")).unwrap();
        assert_eq!(outcome.commands, vec![argv(&["timew", "tag", "@1", "Lunch"])]);
    }

    #[test]
    fn test_continue_and_delete() {
        let target = resolve(Some(0), 4).unwrap();
        let outcome = build_continue("timew", target);
        assert_eq!(outcome.commands, vec![argv(&["timew", "continue", "@4"])]);
        assert_eq!(outcome.status, "continue @4");

        let outcome = build_delete("timew", resolve(None, 4).unwrap());
        assert_eq!(outcome.commands, vec![argv(&["timew", "delete", "@1"])]);
        assert_eq!(outcome.status, "delete @1");
    }

    #[test]
    fn test_start_meeting() {
        let outcome = build_start_meeting("timew", "Design review\n").unwrap();
        assert_eq!(outcome.commands, vec![argv(&["timew", "start", "Design review"])]);
        assert!(matches!(build_start_meeting("timew", ""), Err(BridgeError::NothingScheduled)));
    }

    #[test]
    fn test_fix_start_targets_most_recent() {
        let outcome = build_fix_start("timew", "14:00");
        assert_eq!(outcome.commands, vec![argv(&["timew", "modify", "start", "@1", "14:00"])]);
        assert_eq!(outcome.status, "Modified Start time to 14:00");
    }

    #[test]
    fn test_details() {
        let outcome = build_details(&record(2, &["Write spec", "docs"], true));
        assert!(!outcome.has_commands());
        let text = outcome.details.unwrap();
        assert!(text.contains("Task Tag:   Write spec, docs"));
        assert!(text.contains("Stop Time:"));
        assert!(text.contains("Duration:   1:30:00"));

        let text = build_details(&record(1, &["Review"], false)).details.unwrap();
        assert!(!text.contains("Stop Time:"));
        assert!(text.contains("Duration:   Active"));
    }

    #[test]
    fn test_calendar_track() {
        let entries = vec![
            CalendarEntry::new("Standup", "09:00", "09:15"),
            CalendarEntry::new("Retro", "16:00", "17:00"),
        ];
        let outcome = build_calendar_track("timew", &entries, CalendarChoice::Selected(1)).unwrap();
        assert_eq!(outcome.commands, vec![argv(&["timew", "track", "16:00", "-", "17:00", "Retro"])]);

        let err = build_calendar_track("timew", &entries, CalendarChoice::NothingSelected).unwrap_err();
        assert_eq!(err.to_string(), "Must select an entry in list");

        let outcome = build_calendar_track("timew", &entries, CalendarChoice::Canceled).unwrap();
        assert!(!outcome.has_commands());
        assert_eq!(outcome.status, "Canceled");

        assert!(build_calendar_track("timew", &entries, CalendarChoice::Selected(2)).is_err());
    }

    #[test]
    fn test_calendar_track_untitled_entry() {
        let entries = vec![CalendarEntry::new("", "09:00", "10:00")];
        let err = build_calendar_track("timew", &entries, CalendarChoice::Selected(0)).unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(err.to_string(), "Task name can not be empty");
    }

    #[test]
    fn test_builders_share_no_prefix() {
        let base = String::from("timew");
        let first = build_stop(&base, &fields("", "", "", ""));
        let second = build_start(&base, &fields("", "", "", "Next"));
        assert_eq!(base, "timew");
        assert_eq!(first.commands[0], argv(&["timew", "stop"]));
        assert_eq!(second.commands[0], argv(&["timew", "start", "Next"]));
    }
}
