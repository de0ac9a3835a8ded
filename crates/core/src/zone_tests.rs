// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

/// Clock pinned to a fixed instant.
struct FixedClock(DateTime<Utc>);

impl ClockSource for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn clock(rfc3339: &str) -> FixedClock {
    FixedClock(DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc))
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn default_zone_is_plus_nine() {
    assert_eq!(ReportZone::default().offset().local_minus_utc(), 9 * 3600);
}

#[parameterized(
    too_far_east = { 24 },
    too_far_west = { -24 },
)]
fn from_hours_rejects_out_of_range(hours: i32) {
    assert!(ReportZone::from_hours(hours).is_err());
}

#[test]
fn parse_timestamp_converts_into_zone() {
    let zone = ReportZone::default();
    let t = zone.parse_timestamp("closedAt", "2025-03-31T16:30:00Z").unwrap();
    assert_eq!(t.date_naive(), date("2025-04-01"));
    assert_eq!(t.offset().local_minus_utc(), 9 * 3600);
}

#[parameterized(
    garbage = { "yesterday" },
    date_only = { "2025-03-31" },
    empty = { "" },
)]
fn parse_timestamp_rejects_malformed(raw: &str) {
    let err = ReportZone::utc().parse_timestamp("createdAt", raw).unwrap_err();
    assert!(matches!(err, Error::InvalidTimestamp { field: "createdAt", .. }));
}

#[test]
fn start_of_day_is_local_midnight() {
    let zone = ReportZone::default();
    let start = zone.start_of_day(date("2025-04-01"));
    assert_eq!(start.to_rfc3339(), "2025-04-01T00:00:00+09:00");
}

#[test]
fn from_dates_includes_whole_last_day() {
    let zone = ReportZone::default();
    let range = DateRange::from_dates(&zone, date("2025-04-01"), date("2025-04-30")).unwrap();

    let late = zone.parse_timestamp("t", "2025-04-30T23:59:59+09:00").unwrap();
    let next = zone.parse_timestamp("t", "2025-05-01T00:00:00+09:00").unwrap();
    let early = zone.parse_timestamp("t", "2025-03-31T23:59:59+09:00").unwrap();

    assert!(range.contains(&range.start));
    assert!(range.contains(&late));
    assert!(!range.contains(&next));
    assert!(!range.contains(&early));
}

#[test]
fn from_dates_rejects_reversed_range() {
    let zone = ReportZone::default();
    let err = DateRange::from_dates(&zone, date("2025-05-01"), date("2025-04-01")).unwrap_err();
    assert!(matches!(err, Error::InvalidDateRange { .. }));
}

// 2025-04-10 is a Thursday, so yesterday is Wednesday 2025-04-09.
#[parameterized(
    sunday = { 0, "2025-04-06" },
    sunday_as_seven = { 7, "2025-04-06" },
    monday = { 1, "2025-04-07" },
    wednesday = { 3, "2025-04-09" },
    thursday = { 4, "2025-04-03" },
)]
fn weekly_window_starts_on_previous_weekday(weekday: i64, expected_start: &str) {
    let zone = ReportZone::default();
    let range = DateRange::weekly(&zone, weekday, &clock("2025-04-10T03:00:00+09:00")).unwrap();

    assert_eq!(range.start, zone.start_of_day(date(expected_start)));
    assert_eq!(range.end - range.start, chrono::Duration::days(7));
}

#[test]
fn weekly_window_uses_report_zone_for_today() {
    // 2025-04-09T20:00Z is already Thursday in UTC+09:00.
    let zone = ReportZone::default();
    let range = DateRange::weekly(&zone, 3, &clock("2025-04-09T20:00:00Z")).unwrap();
    assert_eq!(range.start, zone.start_of_day(date("2025-04-09")));
}

#[parameterized(
    negative = { -1 },
    eight = { 8 },
)]
fn weekly_window_rejects_invalid_weekday(weekday: i64) {
    let zone = ReportZone::default();
    let err = DateRange::weekly(&zone, weekday, &clock("2025-04-10T00:00:00Z")).unwrap_err();
    assert!(matches!(err, Error::InvalidWeekday(_)));
}

#[test]
fn last_day_is_the_final_whole_day() {
    let zone = ReportZone::default();
    let range = DateRange::from_dates(&zone, date("2025-04-07"), date("2025-04-13")).unwrap();
    assert_eq!(range.last_day(), date("2025-04-13"));
}
