// Elapsed-time formatting for the task table

use chrono::Duration;

/// Format an elapsed interval as `H:MM:SS`; hours are not wrapped at 24.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.num_seconds().max(0);
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::seconds(0)), "0:00:00");
        assert_eq!(format_elapsed(Duration::seconds(45)), "0:00:45");
        assert_eq!(format_elapsed(Duration::seconds(5400)), "1:30:00");
        assert_eq!(format_elapsed(Duration::hours(26) + Duration::minutes(5)), "26:05:00");
    }
}
