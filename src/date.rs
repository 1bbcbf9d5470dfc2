use crate::errors::LedgerError;
use chrono::{Duration, NaiveDate, Utc};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Current civil day, pinned to UTC so every client sees the same grid
/// columns regardless of where the server or browser runs.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn previous_day(day: NaiveDate) -> NaiveDate {
    day - Duration::days(1)
}

pub fn is_consecutive(a: NaiveDate, b: NaiveDate) -> bool {
    b == a + Duration::days(1)
}

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

pub fn parse_day(value: &str) -> Result<NaiveDate, LedgerError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|_| LedgerError::InvalidDay(value.to_string()))
}
