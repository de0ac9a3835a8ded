// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::commands::testing::{raw, root_raw, url, MapProvider};
use chrono::NaiveDate;
use fa_core::{DateRange, FieldEntry, ReportZone};

fn story(n: u64, estimated: f64, actual: f64) -> fa_core::RawItem {
    let mut item = raw(n, &["sbi", "difficulty:medium"]);
    item.fields = vec![
        FieldEntry::number("見積時間", estimated),
        FieldEntry::number("実績時間", actual),
    ];
    item
}

fn provider() -> MapProvider {
    let mut epic = root_raw(1, &["pbi"]);
    epic.fields = vec![FieldEntry::number("Size", 3.0)];
    let mut dropped = raw(4, &["sbi"]);
    dropped.state_reason = Some("NOT_PLANNED".to_string());

    MapProvider::default()
        .with_root(epic)
        .with_root(root_raw(10, &["pbi"]))
        .with_children(1, vec![story(2, 2.0, 1.0), story(3, 4.0, 5.0), dropped])
}

#[test]
fn build_report_summarizes_each_root() {
    let report = build_report(
        provider(),
        RootFilter::new(["app"]),
        ReportPeriods::default(),
        MaxDepth::default(),
        ParseContext::default(),
    )
    .unwrap();

    assert_eq!(report.summaries.len(), 2);
    let first = &report.summaries[0];
    assert_eq!(first.url, url(1));
    assert_eq!(first.descendant_count, 2);
    assert_eq!(first.total_estimated, 6.0);
    assert_eq!(first.total_actual, 6.0);
    assert!(first.violations.is_empty());

    let second = &report.summaries[1];
    assert_eq!(second.descendant_count, 0);
    assert_eq!(second.violations.len(), 1);

    assert_eq!(report.totals.total_size, 3.0);
    assert_eq!(report.totals.roots_with_violations, 1);
    assert_eq!(report.stats.pruned, 1);
    assert_eq!(report.stats.per_depth, vec![2, 2]);
}

#[test]
fn build_report_applies_filter() {
    let report = build_report(
        provider(),
        RootFilter::new(["other"]),
        ReportPeriods::default(),
        MaxDepth::default(),
        ParseContext::default(),
    )
    .unwrap();

    assert!(report.summaries.is_empty());
    assert_eq!(report.totals.roots, 0);
    assert_eq!(report.filter.repositories, vec!["other".to_string()]);
}

#[test]
fn build_report_honors_max_depth() {
    let provider = provider().with_children(2, vec![story(5, 1.0, 1.0)]);
    let report = build_report(
        provider,
        RootFilter::default(),
        ReportPeriods::default(),
        MaxDepth::new(1).unwrap(),
        ParseContext::default(),
    )
    .unwrap();

    assert_eq!(report.summaries[0].descendant_count, 2);
    assert_eq!(report.stats.truncated, 2);
}

fn days(first: &str, last: &str) -> DateRange {
    let date = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
    DateRange::from_dates(&ReportZone::default(), date(first), date(last)).unwrap()
}

#[test]
fn build_report_weekly_ignores_closed_range() {
    let periods = ReportPeriods {
        weekly: Some(days("2025-04-07", "2025-04-13")),
        ..ReportPeriods::default()
    };
    let report = build_report(
        provider(),
        RootFilter::new(["app"]).closed_within(days("2025-03-01", "2025-03-31")),
        periods,
        MaxDepth::default(),
        ParseContext::default(),
    )
    .unwrap();

    assert!(report.summaries.is_empty());
    assert!(report.monthly.is_empty());
    let weekly = report.weekly.unwrap();
    let urls: Vec<_> = weekly.entries.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, vec![url(1), url(10)]);
    assert_eq!(weekly.unassigned.unwrap().totals.issues, 2);
}

#[test]
fn build_report_lists_missing_time_since_date() {
    let periods = ReportPeriods {
        created_since: Some(ReportZone::default().start_of_day(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())),
        ..ReportPeriods::default()
    };
    let report = build_report(
        provider(),
        RootFilter::new(["app"]),
        periods,
        MaxDepth::default(),
        ParseContext::default(),
    )
    .unwrap();

    let missing = report.missing_time.unwrap();
    assert_eq!(missing.checked, 2);
    assert_eq!(missing.missing_both.len(), 2);
    assert_eq!(report.weekly, None);
}

#[test]
fn build_report_groups_roots_by_month() {
    let report = build_report(
        provider(),
        RootFilter::new(["app"]),
        ReportPeriods::default(),
        MaxDepth::default(),
        ParseContext::default(),
    )
    .unwrap();

    assert_eq!(report.monthly.len(), 1);
    assert_eq!(report.monthly[0].month, "2025-04");
    assert_eq!(report.monthly[0].totals.issues, 2);
    assert_eq!(report.monthly[0].totals.ratio, None);
}
