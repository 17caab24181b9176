//! Workweek periods and local-time helpers.
//!
//! A workweek is the half-open window `[Monday 00:00, Saturday 00:00)` in
//! local time. Window boundaries are always derived from civil calendar
//! dates, so a DST transition inside the week shortens or lengthens the
//! window without moving its wall-clock edges.
//!
//! Functions taking a [`Zoned`] evaluate in that value's own time zone. The
//! helpers that produce "local" values from a [`Timestamp`] resolve the system
//! time zone on every call.

use std::cmp::{max, min};

use jiff::{
    civil::{self, Date, Time},
    tz::TimeZone,
    Timestamp, ToSpan, Zoned,
};

use crate::error::Result;

/// Literal prefix of every workweek period key.
pub const WORKWEEK_KEY_PREFIX: &str = "workweek";

/// Start of daily reminders when the stored value is missing or malformed.
pub const DEFAULT_START_TIME: Time = civil::time(9, 0, 0, 0);

/// Number of days in a workweek window (Monday through Friday).
const WORKWEEK_DAYS: i64 = 5;

/// The local window `[start, end)` of one workweek.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkweekWindow {
    /// Monday 00:00 local, inclusive.
    pub start: Zoned,
    /// Saturday 00:00 local, exclusive.
    pub end: Zoned,
}

impl WorkweekWindow {
    /// Whether `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: Timestamp) -> bool {
        self.start.timestamp() <= instant && instant < self.end.timestamp()
    }

    /// Calendar date of the window's Monday.
    pub fn monday(&self) -> Date {
        self.start.date()
    }
}

/// Current instant.
pub fn now_utc() -> Timestamp {
    Timestamp::now()
}

/// Converts an instant to the current system time zone.
pub fn to_local(instant: Timestamp) -> Zoned {
    instant.to_zoned(TimeZone::system())
}

/// Converts an instant to the given time zone.
pub fn to_local_in(instant: Timestamp, tz: &TimeZone) -> Zoned {
    instant.to_zoned(tz.clone())
}

/// Returns the workweek window containing `local`'s calendar week.
///
/// The Monday is found by stepping back `weekday` days from the local date;
/// both edges are local midnights built from dates, not fixed durations.
pub fn workweek_window_for(local: &Zoned) -> Result<WorkweekWindow> {
    let offset = i64::from(local.weekday().to_monday_zero_offset());
    let monday = local.date().checked_sub(offset.days())?;
    let saturday = monday.checked_add(WORKWEEK_DAYS.days())?;
    let tz = local.time_zone();

    Ok(WorkweekWindow {
        start: monday.to_zoned(tz.clone())?,
        end: saturday.to_zoned(tz.clone())?,
    })
}

/// Stable key of the workweek containing `local`, e.g. `workweek:2026-02-16`.
pub fn period_key_workweek(local: &Zoned) -> Result<String> {
    let window = workweek_window_for(local)?;
    Ok(format!("{WORKWEEK_KEY_PREFIX}:{}", window.monday()))
}

/// Whether `local` falls inside its own workweek window.
///
/// False on Saturday and Sunday.
pub fn is_in_workweek(local: &Zoned) -> Result<bool> {
    Ok(workweek_window_for(local)?.contains(local.timestamp()))
}

/// `local`'s calendar date at `time_of_day`, in `local`'s time zone.
pub fn next_reminder_datetime_local(local: &Zoned, time_of_day: Time) -> Result<Zoned> {
    Ok(local
        .date()
        .to_datetime(time_of_day)
        .to_zoned(local.time_zone().clone())?)
}

/// Tomorrow's calendar date (relative to `local`) at `time_of_day`.
pub fn tomorrow_at(local: &Zoned, time_of_day: Time) -> Result<Zoned> {
    Ok(local
        .date()
        .tomorrow()?
        .to_datetime(time_of_day)
        .to_zoned(local.time_zone().clone())?)
}

/// Whole minutes of `[start, end)` that overlap the workweek containing
/// `start`, using the system time zone.
///
/// See [`split_interval_by_workweek_in`].
pub fn split_interval_by_workweek(start: Timestamp, end: Timestamp) -> Result<i64> {
    split_interval_by_workweek_in(start, end, &TimeZone::system())
}

/// Whole minutes of `[start, end)` that overlap the workweek containing
/// `start` in `tz`.
///
/// The interval is attributed to the week in which it began: anything after
/// that week's Saturday 00:00 is dropped, and an interval starting on a
/// weekend counts nothing. Minutes are floored.
pub fn split_interval_by_workweek_in(start: Timestamp, end: Timestamp, tz: &TimeZone) -> Result<i64> {
    let window = workweek_window_for(&to_local_in(start, tz))?;

    let from = max(start, window.start.timestamp());
    let to = min(end, window.end.timestamp());
    if to <= from {
        return Ok(0);
    }

    Ok(to.duration_since(from).as_secs() / 60)
}

/// ISO calendar date of `local`, as stored for "skipped today".
pub fn local_date_key(local: &Zoned) -> String {
    local.date().to_string()
}

/// Parses `HH:MM` into a time of day.
pub fn parse_hhmm(value: &str) -> Option<Time> {
    let (hour, minute) = value.trim().split_once(':')?;
    let hour: i8 = hour.trim().parse().ok()?;
    let minute: i8 = minute.trim().parse().ok()?;
    Time::new(hour, minute, 0, 0).ok()
}

/// Parses `HH:MM`, falling back to [`DEFAULT_START_TIME`].
pub fn parse_hhmm_or_default(value: &str) -> Time {
    parse_hhmm(value).unwrap_or(DEFAULT_START_TIME)
}

/// Formats a time of day as `HH:MM`.
pub fn format_hhmm(time: Time) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("09:00"), Some(civil::time(9, 0, 0, 0)));
        assert_eq!(parse_hhmm("7:5"), Some(civil::time(7, 5, 0, 0)));
        assert_eq!(parse_hhmm(" 23:59 "), Some(civil::time(23, 59, 0, 0)));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("nine"), None);
        assert_eq!(parse_hhmm("09"), None);
    }

    #[test]
    fn test_malformed_time_falls_back_to_nine() {
        assert_eq!(parse_hhmm_or_default("garbage"), DEFAULT_START_TIME);
        assert_eq!(parse_hhmm_or_default(""), DEFAULT_START_TIME);
        assert_eq!(parse_hhmm_or_default("10:30"), civil::time(10, 30, 0, 0));
    }

    #[test]
    fn test_format_hhmm() {
        assert_eq!(format_hhmm(civil::time(8, 5, 0, 0)), "08:05");
    }
}
