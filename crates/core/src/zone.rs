// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report time zone, closed-date ranges and clock injection.
//!
//! Every timestamp that enters the pipeline is converted into the configured
//! [`ReportZone`]. Day boundaries (for `START_DATE`/`END_DATE` and weekday
//! windows) are computed in that zone as well.

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::Serialize;

use crate::error::{Error, Result};

/// Default offset of the report zone (UTC+09:00).
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Trait for getting the current wall clock time.
///
/// This allows injecting a fixed clock for testing.
pub trait ClockSource {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using [`Utc::now`].
#[derive(Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: ClockSource> ClockSource for &C {
    fn now(&self) -> DateTime<Utc> {
        (*self).now()
    }
}

/// The fixed-offset zone used for parsing and day arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportZone {
    offset: FixedOffset,
}

impl Default for ReportZone {
    fn default() -> Self {
        ReportZone {
            offset: FixedOffset::east_opt(DEFAULT_UTC_OFFSET_HOURS * 3600).unwrap_or(Utc.fix()),
        }
    }
}

impl ReportZone {
    /// Builds a zone from a whole-hour offset east of UTC.
    pub fn from_hours(hours: i32) -> Result<Self> {
        if !(-23..=23).contains(&hours) {
            return Err(Error::InvalidOffset(hours));
        }
        FixedOffset::east_opt(hours * 3600)
            .map(|offset| ReportZone { offset })
            .ok_or(Error::InvalidOffset(hours))
    }

    /// The UTC zone.
    pub fn utc() -> Self {
        ReportZone { offset: Utc.fix() }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Parses an RFC 3339 timestamp and converts it into this zone.
    pub fn parse_timestamp(&self, field: &'static str, raw: &str) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(raw.trim())
            .map(|t| t.with_timezone(&self.offset))
            .map_err(|_| Error::InvalidTimestamp { field, value: raw.to_string() })
    }

    /// Parses a `YYYY-MM-DD` calendar date.
    pub fn parse_date(&self, raw: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| Error::InvalidDate(raw.to_string()))
    }

    /// Local midnight at the start of `date`.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<FixedOffset> {
        let local = date.and_time(NaiveTime::MIN);
        let utc = local - chrono::Duration::seconds(i64::from(self.offset.local_minus_utc()));
        self.offset.from_utc_datetime(&utc)
    }

    /// The calendar date of `now` in this zone.
    pub fn today(&self, clock: &impl ClockSource) -> NaiveDate {
        clock.now().with_timezone(&self.offset).date_naive()
    }
}

/// A half-open `[start, end)` interval of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl DateRange {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(DateRange { start, end })
    }

    /// Whole days from `first` through `last` inclusive, in `zone`.
    pub fn from_dates(zone: &ReportZone, first: NaiveDate, last: NaiveDate) -> Result<Self> {
        if first > last {
            return Err(Error::InvalidDateRange {
                start: first.to_string(),
                end: last.to_string(),
            });
        }
        let after_last = last
            .checked_add_days(Days::new(1))
            .ok_or_else(|| Error::InvalidDate(last.to_string()))?;
        DateRange::new(zone.start_of_day(first), zone.start_of_day(after_last))
    }

    /// The seven-day window that starts on the most recent `weekday` on or
    /// before yesterday.
    ///
    /// `weekday` follows the 0-7 convention where both 0 and 7 mean Sunday.
    pub fn weekly(zone: &ReportZone, weekday: i64, clock: &impl ClockSource) -> Result<Self> {
        let target = match weekday {
            7 => 0,
            0..=6 => weekday,
            _ => return Err(Error::InvalidWeekday(weekday)),
        };
        let today = zone.today(clock);
        let yesterday = today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| Error::InvalidDate(today.to_string()))?;
        let since = (i64::from(yesterday.weekday().num_days_from_sunday()) - target + 7) % 7;
        let first = yesterday
            .checked_sub_days(Days::new(since.unsigned_abs()))
            .ok_or_else(|| Error::InvalidDate(yesterday.to_string()))?;
        let last = first
            .checked_add_days(Days::new(6))
            .ok_or_else(|| Error::InvalidDate(first.to_string()))?;
        DateRange::from_dates(zone, first, last)
    }

    pub fn contains(&self, instant: &DateTime<FixedOffset>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    /// The calendar day of the last instant in the range, in the start's
    /// offset.
    pub fn last_day(&self) -> NaiveDate {
        let last = if self.end > self.start {
            self.end - chrono::Duration::seconds(1)
        } else {
            self.end
        };
        last.with_timezone(&self.start.timezone()).date_naive()
    }
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod tests;
