use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DueDateError {
    #[error("can't read {0:?} as a date; try YYYY-MM-DD HH:MM, YYYY-MM-DD or HH:MM")]
    Unrecognized(String),
    #[error("{0} does not exist in the local timezone")]
    Nonexistent(NaiveDateTime),
}

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or_default()
}

/// Parse user input in the local timezone. Blank input means no due date.
pub fn parse_due_date(input: &str) -> Result<Option<DateTime<Utc>>, DueDateError> {
    parse_due_date_in(input, &Local, Local::now().date_naive())
}

/// Accepted forms:
/// - `YYYY-MM-DD HH:MM`
/// - `YYYY-MM-DD` (end of that day)
/// - `HH:MM` (today)
pub fn parse_due_date_in<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
    today: NaiveDate,
) -> Result<Option<DateTime<Utc>>, DueDateError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let naive = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(end_of_day()))
        })
        .or_else(|| {
            NaiveTime::parse_from_str(input, "%H:%M")
                .ok()
                .map(|time| today.and_time(time))
        })
        .ok_or_else(|| DueDateError::Unrecognized(input.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(Some(dt.with_timezone(&Utc))),
        // Clocks going back: take the earlier instant
        LocalResult::Ambiguous(earliest, _) => Ok(Some(earliest.with_timezone(&Utc))),
        LocalResult::None => Err(DueDateError::Nonexistent(naive)),
    }
}

/// "Today 14:30" for today, otherwise "Mar 4, 14:30"
pub fn format_due_date<Tz: TimeZone>(due: DateTime<Utc>, tz: &Tz, today: NaiveDate) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let local = due.with_timezone(tz);
    if local.date_naive() == today {
        format!("Today {}", local.format("%H:%M"))
    } else {
        local.format("%b %-d, %H:%M").to_string()
    }
}

/// Local-time rendering used by the UI and CLI
pub fn format_due_local(due: DateTime<Utc>) -> String {
    format_due_date(due, &Local, Local::now().date_naive())
}
