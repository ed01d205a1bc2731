// ABOUTME: Calendar date and local-time day range used to scope every metric query
// ABOUTME: A day D covers [D 00:00:00.000, D 23:59:59.999] in the host's local time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    SecondsFormat, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

use crate::errors::{HealthError, HealthResult};

/// A calendar day, compared only for equality and ordering, never merged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Wrap a chrono date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a date from year, month and day
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the components do not form a valid date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> HealthResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| HealthError::invalid_date(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Today in the host's local time zone
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Underlying chrono date
    #[must_use]
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Move by a signed number of days
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if the result falls outside chrono's range.
    pub fn add_days(&self, days: i64) -> HealthResult<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Self)
            .ok_or_else(|| HealthError::invalid_date(format!("{self} {days:+} days")))
    }

    /// Label in the `Mon Jan 01 2024` form shown by the date stepper
    #[must_use]
    pub fn display_label(&self) -> String {
        self.0.format("%a %b %d %Y").to_string()
    }

    /// Day range in the host's local time zone
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if neither boundary can be resolved locally.
    pub fn day_range(&self) -> HealthResult<DayRange> {
        self.day_range_in(&Local)
    }

    /// Day range in an explicit time zone
    ///
    /// Midnight that falls inside a DST gap resolves to the first instant after
    /// the gap; ambiguous boundaries take the earliest start and latest end.
    ///
    /// # Errors
    ///
    /// Returns `HealthError::InvalidDate` if neither boundary can be resolved.
    pub fn day_range_in<Tz: TimeZone>(&self, tz: &Tz) -> HealthResult<DayRange> {
        let start_naive = self
            .0
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| HealthError::invalid_date("start-of-day time"))?;
        let end_naive = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)
            .map(|t| self.0.and_time(t))
            .ok_or_else(|| HealthError::invalid_date("end-of-day time"))?;

        let start = resolve_local(tz, start_naive, Boundary::Start)
            .or_else(|| resolve_local(tz, start_naive + Duration::hours(1), Boundary::Start))
            .ok_or_else(|| HealthError::invalid_date(format!("{self} has no local midnight")))?;
        let end = resolve_local(tz, end_naive, Boundary::End)
            .or_else(|| resolve_local(tz, end_naive - Duration::hours(1), Boundary::End))
            .ok_or_else(|| HealthError::invalid_date(format!("{self} has no local end of day")))?;

        Ok(DayRange { start, end })
    }
}

#[derive(Clone, Copy)]
enum Boundary {
    Start,
    End,
}

fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    naive: NaiveDateTime,
    boundary: Boundary,
) -> Option<DateTime<FixedOffset>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, latest) => Some(match boundary {
            Boundary::Start => earliest.fixed_offset(),
            Boundary::End => latest.fixed_offset(),
        }),
        LocalResult::None => None,
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDate {
    type Err = HealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| HealthError::invalid_date(format!("'{s}': {e}")))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Inclusive local-time bounds of one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    /// First instant of the day (00:00:00.000 local)
    pub start: DateTime<FixedOffset>,
    /// Last instant of the day (23:59:59.999 local)
    pub end: DateTime<FixedOffset>,
}

impl DayRange {
    /// Whether an instant falls within the day, both ends inclusive
    #[must_use]
    pub fn contains<Tz: TimeZone>(&self, instant: &DateTime<Tz>) -> bool {
        let instant = instant.fixed_offset();
        self.start <= instant && instant <= self.end
    }

    /// Start as UTC
    #[must_use]
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    /// End as UTC
    #[must_use]
    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// Start as an RFC 3339 UTC timestamp with millisecond precision
    #[must_use]
    pub fn start_rfc3339(&self) -> String {
        self.start_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// End as an RFC 3339 UTC timestamp with millisecond precision
    #[must_use]
    pub fn end_rfc3339(&self) -> String {
        self.end_utc().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_day_range_bounds_in_fixed_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let range = CalendarDate::from_ymd(2024, 1, 1)
            .unwrap()
            .day_range_in(&tz)
            .unwrap();

        assert_eq!(range.start.to_rfc3339(), "2024-01-01T00:00:00+02:00");
        assert_eq!(range.start_rfc3339(), "2023-12-31T22:00:00.000Z");
        assert_eq!(range.end_rfc3339(), "2024-01-01T21:59:59.999Z");
    }

    #[test]
    fn test_day_range_contains_is_inclusive() {
        let range = CalendarDate::from_ymd(2024, 3, 5)
            .unwrap()
            .day_range_in(&Utc)
            .unwrap();
        assert!(range.contains(&range.start));
        assert!(range.contains(&range.end));
        assert!(!range.contains(&(range.end + Duration::milliseconds(1))));
    }

    #[test]
    fn test_parse_and_label() {
        let date: CalendarDate = "2024-01-01".parse().unwrap();
        assert_eq!(date.display_label(), "Mon Jan 01 2024");
        assert_eq!(date.to_string(), "2024-01-01");
        assert!("2024-13-01".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn test_add_days_crosses_month() {
        let date = CalendarDate::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.add_days(1).unwrap().to_string(), "2024-03-01");
        assert_eq!(date.add_days(-29).unwrap().to_string(), "2024-01-31");
    }
}
