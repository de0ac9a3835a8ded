// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::family::{BuildReport, FamilyBuilder, MaxDepth};
use crate::item::{CloseReason, Metrics};
use crate::raw::ParseContext;
use crate::testing::{epic, item, raw, story, ts, FakeProvider};
use crate::zone::ReportZone;
use chrono::NaiveDate;

fn family(root: crate::item::WorkItem) -> Family {
    Family {
        root,
        report: BuildReport::default(),
    }
}

#[test]
fn end_to_end_root_with_two_stories() {
    let provider = FakeProvider::new().with_children(
        1,
        vec![
            raw(2)
                .labels(["sbi", "difficulty:low"])
                .number("見積時間", 4.0)
                .number("実績時間", 3.0)
                .build(),
            raw(3).labels(["sbi"]).number("実績時間", 2.0).build(),
        ],
    );
    let builder = FamilyBuilder::new(&provider, MaxDepth::default(), ParseContext::default());
    let family = builder.build(epic(1, Some(5.0)));
    let summary = summarize(&family);

    assert_eq!(summary.size, Some(5.0));
    assert_eq!(summary.total_estimated, 4.0);
    assert_eq!(summary.total_actual, 5.0);
    assert_eq!(summary.descendant_count, 2);
    assert_eq!(summary.violations.len(), 1);
    assert_eq!(summary.violations[0].number, Some(3));
    assert_eq!(summary.violations[0].reason(), "Estimated missing, Difficulty missing");
}

#[test]
fn root_violation_comes_first() {
    let mut root = epic(1, None);
    root.children = vec![story(2, None, None, true)];
    let summary = summarize(&family(root));

    let numbers: Vec<_> = summary.violations.iter().map(|v| v.number).collect();
    assert_eq!(numbers, vec![Some(1), Some(2)]);
    assert_eq!(summary.size, None);
}

#[test]
fn run_totals_sum_summaries() {
    let mut a = epic(1, Some(3.0));
    a.children = vec![story(2, Some(4.0), Some(6.0), true)];
    let mut b = epic(3, None);
    b.children = vec![story(4, Some(4.0), Some(2.0), true)];
    let summaries = vec![summarize(&family(a)), summarize(&family(b))];

    let totals = RunTotals::from_summaries(&summaries);
    assert_eq!(totals.roots, 2);
    assert_eq!(totals.total_size, 3.0);
    assert_eq!(totals.total_estimated, 8.0);
    assert_eq!(totals.total_actual, 8.0);
    assert_eq!(totals.roots_with_violations, 1);
    assert_eq!(totals.violation_count, 1);
    assert_eq!(totals.actual_ratio, Some(1.0));
}

#[test]
fn run_totals_ratio_absent_without_estimates() {
    let totals = RunTotals::from_summaries(&[summarize(&family(epic(1, Some(1.0))))]);
    assert_eq!(totals.actual_ratio, None);
    assert_eq!(RunTotals::from_summaries(&[]), RunTotals::default());
}

#[test]
fn hierarchy_stats_count_per_depth() {
    let mut child = story(2, Some(1.0), Some(1.0), true);
    child.children = vec![story(3, Some(1.0), Some(1.0), true)];
    let mut first = epic(1, Some(1.0));
    first.children = vec![child, story(4, Some(1.0), Some(1.0), true)];
    let second = epic(5, Some(1.0));

    let mut with_report = family(first);
    with_report.report.truncated = 2;
    let families = vec![with_report, family(second)];
    let stats = HierarchyStats::collect(&families);

    assert_eq!(stats.families, 2);
    assert_eq!(stats.per_depth, vec![2, 2, 1]);
    assert_eq!(stats.total_nodes, 5);
    assert_eq!(stats.descendants, 3);
    assert_eq!(stats.max_depth(), 2);
    assert_eq!(stats.truncated, 2);
}

#[test]
fn hierarchy_stats_empty() {
    let stats = HierarchyStats::collect(&[]);
    assert_eq!(stats.max_depth(), 0);
    assert_eq!(stats.total_nodes, 0);
}

fn timed(n: u64, closed: &str, estimated: Option<f64>, actual: Option<f64>) -> WorkItem {
    item(n).closed(ts(closed), CloseReason::Completed).with_metrics(Metrics {
        size: None,
        estimated,
        actual,
    })
}

fn week() -> DateRange {
    DateRange::from_dates(
        &ReportZone::default(),
        NaiveDate::from_ymd_opt(2025, 4, 7).unwrap(),
        NaiveDate::from_ymd_opt(2025, 4, 13).unwrap(),
    )
    .unwrap()
}

#[test]
fn time_totals_skip_unset_fields() {
    let entries: Vec<TimeEntry> = [
        timed(1, "2025-04-08T10:00:00+09:00", Some(4.0), Some(6.0)),
        timed(2, "2025-04-08T10:00:00+09:00", Some(2.0), None),
        timed(3, "2025-04-08T10:00:00+09:00", None, None),
    ]
    .iter()
    .map(TimeEntry::from_item)
    .collect();
    let totals = TimeTotals::from_entries(&entries);

    assert_eq!(totals.issues, 3);
    assert_eq!(totals.with_estimate, 2);
    assert_eq!(totals.with_actual, 1);
    assert_eq!(totals.total_estimated, 6.0);
    assert_eq!(totals.average_estimated, Some(3.0));
    assert_eq!(totals.average_actual, Some(6.0));
    assert_eq!(totals.ratio, Some(1.0));
}

#[test]
fn time_totals_empty_have_no_averages() {
    let totals = TimeTotals::from_entries(&Vec::<TimeEntry>::new());
    assert_eq!(totals, TimeTotals::default());
    assert_eq!(totals.ratio, None);
}

#[test]
fn monthly_summaries_group_by_close_month() {
    let roots = [
        timed(1, "2025-05-02T10:00:00+09:00", Some(1.0), Some(2.0)),
        timed(2, "2025-04-30T23:00:00+09:00", Some(2.0), Some(2.0)),
        timed(3, "2025-04-01T00:00:00+09:00", None, Some(1.0)),
        item(4),
    ];
    let months = monthly_summaries(&roots);

    let names: Vec<_> = months.iter().map(|m| m.month.as_str()).collect();
    assert_eq!(names, vec!["2025-04", "2025-05"]);
    assert_eq!(months[0].totals.issues, 2);
    assert_eq!(months[0].totals.total_estimated, 2.0);
    assert_eq!(months[0].totals.total_actual, 3.0);
    assert_eq!(months[0].totals.ratio, Some(1.5));
    assert_eq!(months[1].totals.ratio, Some(2.0));
}

#[test]
fn weekly_report_keeps_roots_closed_in_window() {
    let roots = [
        timed(1, "2025-04-13T23:59:59+09:00", Some(1.0), Some(1.0)),
        timed(2, "2025-04-14T00:00:00+09:00", Some(1.0), Some(1.0)),
        timed(3, "2025-04-07T00:00:00+09:00", Some(2.0), None),
        timed(4, "2025-04-06T23:59:59+09:00", Some(1.0), Some(1.0)),
    ];
    let weekly = WeeklyReport::new(week(), &roots);

    let numbers: Vec<_> = weekly.entries.iter().map(|e| e.number).collect();
    assert_eq!(numbers, vec![Some(3), Some(1)]);
    assert_eq!(weekly.totals.issues, 2);
    assert_eq!(weekly.totals.total_estimated, 3.0);
    assert_eq!(weekly.totals.with_actual, 1);
}

#[test]
fn weekly_report_breaks_down_by_person() {
    let roots = [
        timed(1, "2025-04-08T10:00:00+09:00", Some(2.0), Some(3.0)).with_assignees(["bob", "alice"]),
        timed(2, "2025-04-09T10:00:00+09:00", Some(1.0), None).with_assignees(["alice"]),
        timed(3, "2025-04-10T10:00:00+09:00", None, None),
    ];
    let weekly = WeeklyReport::new(week(), &roots);

    let people: Vec<_> = weekly.rows().map(|p| p.person.as_str()).collect();
    assert_eq!(people, vec!["alice", "bob", UNASSIGNED]);

    let alice = &weekly.people[0];
    assert_eq!(alice.totals.issues, 2);
    assert_eq!(alice.totals.total_estimated, 3.0);
    assert_eq!(alice.totals.total_actual, 3.0);
    assert_eq!(alice.missing_time, 1);

    let bob = &weekly.people[1];
    assert_eq!(bob.totals.ratio, Some(1.5));
    assert_eq!(bob.missing_time, 0);

    let unassigned = weekly.unassigned.as_ref().unwrap();
    assert_eq!(unassigned.totals.issues, 1);
    assert_eq!(unassigned.missing_time, 1);
}

#[test]
fn weekly_report_without_matches_is_empty() {
    let weekly = WeeklyReport::new(week(), &[timed(1, "2025-03-01T10:00:00+09:00", None, None)]);
    assert!(weekly.entries.is_empty());
    assert!(weekly.people.is_empty());
    assert_eq!(weekly.unassigned, None);
}

#[test]
fn missing_time_buckets_roots_created_since() {
    let created = |n: u64, at: &str, estimated, actual| {
        let mut root = timed(n, "2025-04-20T10:00:00+09:00", estimated, actual);
        root.created_at = ts(at);
        root
    };
    let roots = [
        created(1, "2025-04-01T00:00:00+09:00", None, None),
        created(2, "2025-04-02T00:00:00+09:00", None, Some(1.0)),
        created(3, "2025-04-03T00:00:00+09:00", Some(1.0), None),
        created(4, "2025-04-04T00:00:00+09:00", Some(1.0), Some(1.0)),
        created(5, "2025-03-31T23:59:59+09:00", None, None),
    ];
    let report = MissingTimeReport::new(ts("2025-04-01T00:00:00+09:00"), &roots);

    assert_eq!(report.checked, 4);
    assert_eq!(report.missing_both[0].number, Some(1));
    assert_eq!(report.missing_estimated[0].number, Some(2));
    assert_eq!(report.missing_actual[0].number, Some(3));
    assert_eq!(report.missing(), 3);
    assert_eq!(report.missing_percent(), Some(75.0));
}

#[test]
fn missing_time_without_candidates_has_no_percent() {
    let report = MissingTimeReport::new(ts("2030-01-01T00:00:00Z"), &[item(1)]);
    assert_eq!(report.checked, 0);
    assert_eq!(report.missing_percent(), None);
}
