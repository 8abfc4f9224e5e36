// Date and time-of-day parsing for user input and tracker exports

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use crate::error::{BridgeError, BridgeResult};

/// Timestamp layout used by `timew export` (always UTC)
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Check that `text` has the digit/separator layout of `template`,
/// where `9` stands for any ASCII digit.
fn matches_shape(text: &str, template: &str) -> bool {
    text.len() == template.len()
        && text.bytes().zip(template.bytes()).all(|(c, t)| match t {
            b'9' => c.is_ascii_digit(),
            _ => c == t,
        })
}

/// Validate a calendar date in `YYYY-MM-DD` form.
///
/// The empty string is invalid here; callers decide whether an empty
/// field means "not supplied" before asking.
pub fn is_valid_date(text: &str) -> bool {
    matches_shape(text, "9999-99-99") && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

/// Validate a 24-hour `HH:MM` time of day (no seconds)
pub fn is_valid_time(text: &str) -> bool {
    matches_shape(text, "99:99") && NaiveTime::parse_from_str(text, "%H:%M").is_ok()
}

/// Parse a timestamp from the tracker's JSON export
pub fn parse_export_timestamp(text: &str) -> BridgeResult<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(text, EXPORT_TIMESTAMP_FORMAT)
        .map_err(|e| BridgeError::Export(format!("bad timestamp '{}': {}", text, e)))?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Convert a UTC timestamp to the local zone. Display only.
pub fn to_local(utc: DateTime<Utc>) -> DateTime<Local> {
    utc.with_timezone(&Local)
}

/// Local wall-clock time of a UTC timestamp, `HH:MM:SS`
pub fn format_local_time(utc: DateTime<Utc>) -> String {
    to_local(utc).format("%H:%M:%S").to_string()
}
