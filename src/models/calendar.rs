/// One event from the calendar tool. Times are local wall-clock
/// strings for today, exactly as the calendar tool printed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub title: String,
    pub start: String,
    pub end: String,
}

impl CalendarEntry {
    pub fn new(title: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// What the user did when offered a list of calendar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarChoice {
    /// Index into the offered list
    Selected(usize),
    /// Confirmed without picking a row
    NothingSelected,
    Canceled,
}
