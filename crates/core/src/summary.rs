// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-root summaries, run-wide statistics and the period reports.
//!
//! The period reports (monthly, weekly and missing-time) look only at each
//! root's own estimated and actual fields, not at its subtree.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::aggregate::{aggregate, canonical_sum};
use crate::family::Family;
use crate::item::WorkItem;
use crate::validate::{validate, Violation};
use crate::zone::DateRange;

/// Label used for items without assignees in per-person breakdowns.
pub const UNASSIGNED: &str = "Unassigned";

/// Reportable figures for one root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub title: String,
    /// The root's own size.
    pub size: Option<f64>,
    pub total_estimated: f64,
    pub total_actual: f64,
    pub descendant_count: usize,
    /// The root's violation (if any) followed by its descendants'.
    pub violations: Vec<Violation>,
}

impl Summary {
    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}

/// Combines the root's own size and violation with its subtree aggregate.
pub fn summarize(family: &Family) -> Summary {
    let root = &family.root;
    let agg = aggregate(root);

    let mut violations = Vec::with_capacity(agg.violations.len() + 1);
    violations.extend(validate(root));
    violations.extend(agg.violations);

    Summary {
        url: root.url.clone(),
        number: root.number(),
        title: root.title.clone(),
        size: root.metrics.size,
        total_estimated: agg.total_estimated,
        total_actual: agg.total_actual,
        descendant_count: agg.descendant_count,
        violations,
    }
}

/// Totals across every summary in a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunTotals {
    pub roots: usize,
    pub total_size: f64,
    pub total_estimated: f64,
    pub total_actual: f64,
    /// Roots with at least one violation in their family.
    pub roots_with_violations: usize,
    pub violation_count: usize,
    /// Actual over estimated time; `None` when nothing was estimated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_ratio: Option<f64>,
}

impl RunTotals {
    pub fn from_summaries(summaries: &[Summary]) -> Self {
        let total_estimated = canonical_sum(summaries.iter().map(|s| s.total_estimated).collect());
        let total_actual = canonical_sum(summaries.iter().map(|s| s.total_actual).collect());
        RunTotals {
            roots: summaries.len(),
            total_size: canonical_sum(summaries.iter().filter_map(|s| s.size).collect()),
            total_estimated,
            total_actual,
            roots_with_violations: summaries.iter().filter(|s| s.has_violations()).count(),
            violation_count: summaries.iter().map(|s| s.violations.len()).sum(),
            actual_ratio: (total_estimated > 0.0).then(|| total_actual / total_estimated),
        }
    }
}

/// Shape of all families built in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HierarchyStats {
    pub families: usize,
    pub total_nodes: usize,
    pub descendants: usize,
    /// Node count per depth; index 0 counts roots.
    pub per_depth: Vec<usize>,
    pub truncated: usize,
    pub pruned: usize,
    pub cycles: usize,
    pub fetch_errors: usize,
    pub malformed: usize,
}

impl HierarchyStats {
    pub fn collect<'a>(families: impl IntoIterator<Item = &'a Family>) -> Self {
        let mut stats = HierarchyStats::default();
        for family in families {
            stats.add(family);
        }
        stats
    }

    pub fn add(&mut self, family: &Family) {
        self.families += 1;
        family.for_each_node(|_, depth| {
            if self.per_depth.len() <= depth {
                self.per_depth.resize(depth + 1, 0);
            }
            self.per_depth[depth] += 1;
            self.total_nodes += 1;
            if depth > 0 {
                self.descendants += 1;
            }
        });
        let report = &family.report;
        self.truncated += report.truncated;
        self.pruned += report.pruned.len();
        self.cycles += report.cycles.len();
        self.fetch_errors += report.fetch_errors.len();
        self.malformed += report.malformed.len();
    }

    /// Deepest level that holds at least one node.
    pub fn max_depth(&self) -> usize {
        self.per_depth.len().saturating_sub(1)
    }
}

/// A root's own time fields, as listed in the period reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub title: String,
    pub assignees: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<FixedOffset>>,
    pub estimated: Option<f64>,
    pub actual: Option<f64>,
}

impl TimeEntry {
    pub fn from_item(item: &WorkItem) -> Self {
        TimeEntry {
            url: item.url.clone(),
            number: item.number(),
            title: item.title.clone(),
            assignees: item.assignees.clone(),
            created_at: item.created_at,
            closed_at: item.closed_at,
            estimated: item.metrics.estimated,
            actual: item.metrics.actual,
        }
    }

    /// True if either time field is unset.
    pub fn is_missing_time(&self) -> bool {
        self.estimated.is_none() || self.actual.is_none()
    }
}

/// Counts and sums over a set of [`TimeEntry`] values. Unset fields are
/// left out of the sums and averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeTotals {
    pub issues: usize,
    pub with_estimate: usize,
    pub with_actual: usize,
    pub total_estimated: f64,
    pub total_actual: f64,
    /// Mean over entries with an estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_estimated: Option<f64>,
    /// Mean over entries with an actual.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_actual: Option<f64>,
    /// Actual over estimated time; `None` when nothing was estimated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl TimeTotals {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> Self {
        let mut issues = 0;
        let mut estimated = Vec::new();
        let mut actual = Vec::new();
        for entry in entries {
            issues += 1;
            estimated.extend(entry.estimated);
            actual.extend(entry.actual);
        }
        let with_estimate = estimated.len();
        let with_actual = actual.len();
        let total_estimated = canonical_sum(estimated);
        let total_actual = canonical_sum(actual);
        TimeTotals {
            issues,
            with_estimate,
            with_actual,
            total_estimated,
            total_actual,
            average_estimated: (with_estimate > 0).then(|| total_estimated / with_estimate as f64),
            average_actual: (with_actual > 0).then(|| total_actual / with_actual as f64),
            ratio: (total_estimated > 0.0).then(|| total_actual / total_estimated),
        }
    }
}

/// Roots closed in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// `YYYY-MM` of the closed-at timestamp in the report zone.
    pub month: String,
    pub totals: TimeTotals,
}

/// Groups `roots` by the month they were closed in, oldest first. Roots
/// without a closed-at timestamp are skipped.
pub fn monthly_summaries<'a>(roots: impl IntoIterator<Item = &'a WorkItem>) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<String, Vec<TimeEntry>> = BTreeMap::new();
    for root in roots {
        if let Some(closed_at) = root.closed_at {
            months
                .entry(closed_at.format("%Y-%m").to_string())
                .or_default()
                .push(TimeEntry::from_item(root));
        }
    }
    months
        .into_iter()
        .map(|(month, entries)| MonthlySummary {
            month,
            totals: TimeTotals::from_entries(&entries),
        })
        .collect()
}

/// One person's share of a weekly report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTotals {
    pub person: String,
    pub totals: TimeTotals,
    /// Entries with an unset estimated or actual field.
    pub missing_time: usize,
    pub entries: Vec<TimeEntry>,
}

impl PersonTotals {
    fn new(person: String, entries: Vec<TimeEntry>) -> Self {
        PersonTotals {
            totals: TimeTotals::from_entries(&entries),
            missing_time: entries.iter().filter(|e| e.is_missing_time()).count(),
            person,
            entries,
        }
    }
}

/// Roots closed within a weekly window, with a per-assignee breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyReport {
    pub range: DateRange,
    pub totals: TimeTotals,
    /// Sorted by closed-at.
    pub entries: Vec<TimeEntry>,
    /// One row per assignee, sorted by name. An entry with several
    /// assignees counts for each of them.
    pub people: Vec<PersonTotals>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unassigned: Option<PersonTotals>,
}

impl WeeklyReport {
    /// Keeps the roots whose closed-at falls in `range`.
    pub fn new<'a>(range: DateRange, roots: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        let mut entries: Vec<TimeEntry> = roots
            .into_iter()
            .filter(|root| root.closed_at.is_some_and(|closed| range.contains(&closed)))
            .map(TimeEntry::from_item)
            .collect();
        entries.sort_by(|a, b| a.closed_at.cmp(&b.closed_at).then(a.number.cmp(&b.number)));

        let mut by_person: BTreeMap<String, Vec<TimeEntry>> = BTreeMap::new();
        let mut unassigned = Vec::new();
        for entry in &entries {
            if entry.assignees.is_empty() {
                unassigned.push(entry.clone());
            }
            for person in &entry.assignees {
                by_person.entry(person.clone()).or_default().push(entry.clone());
            }
        }

        WeeklyReport {
            range,
            totals: TimeTotals::from_entries(&entries),
            people: by_person
                .into_iter()
                .map(|(person, entries)| PersonTotals::new(person, entries))
                .collect(),
            unassigned: (!unassigned.is_empty()).then(|| PersonTotals::new(UNASSIGNED.to_string(), unassigned)),
            entries,
        }
    }

    /// Per-person rows with the unassigned row last.
    pub fn rows(&self) -> impl Iterator<Item = &PersonTotals> {
        self.people.iter().chain(self.unassigned.as_ref())
    }
}

/// Roots created on or after a date that lack estimated or actual time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingTimeReport {
    pub since: DateTime<FixedOffset>,
    /// Roots created on or after `since`.
    pub checked: usize,
    pub missing_both: Vec<TimeEntry>,
    pub missing_estimated: Vec<TimeEntry>,
    pub missing_actual: Vec<TimeEntry>,
}

impl MissingTimeReport {
    pub fn new<'a>(since: DateTime<FixedOffset>, roots: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        let mut report = MissingTimeReport {
            since,
            checked: 0,
            missing_both: Vec::new(),
            missing_estimated: Vec::new(),
            missing_actual: Vec::new(),
        };
        for root in roots.into_iter().filter(|r| r.created_at >= since) {
            report.checked += 1;
            let entry = TimeEntry::from_item(root);
            match (entry.estimated, entry.actual) {
                (None, None) => report.missing_both.push(entry),
                (None, Some(_)) => report.missing_estimated.push(entry),
                (Some(_), None) => report.missing_actual.push(entry),
                (Some(_), Some(_)) => {}
            }
        }
        report
    }

    pub fn missing(&self) -> usize {
        self.missing_both.len() + self.missing_estimated.len() + self.missing_actual.len()
    }

    /// Share of checked roots missing time, in percent.
    pub fn missing_percent(&self) -> Option<f64> {
        (self.checked > 0).then(|| self.missing() as f64 * 100.0 / self.checked as f64)
    }
}

#[cfg(test)]
#[path = "summary_tests.rs"]
mod tests;
