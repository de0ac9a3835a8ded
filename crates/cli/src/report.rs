// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The result of one audit run, ready for rendering.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use fa_core::{
    monthly_summaries, summarize, DateRange, Family, HierarchyStats, MissingTimeReport, MonthlySummary,
    RootFilter, RunTotals, Summary, WeeklyReport, WorkItem,
};

/// Optional reports requested next to the main audit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportPeriods {
    /// Weekly window; selected independently of the closed-date range.
    pub weekly: Option<DateRange>,
    /// Creation cut-off for the missing-time listing.
    pub created_since: Option<DateTime<FixedOffset>>,
}

/// Families plus everything derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub filter: RootFilter,
    pub summaries: Vec<Summary>,
    pub families: Vec<Family>,
    pub stats: HierarchyStats,
    pub totals: RunTotals,
    pub monthly: Vec<MonthlySummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly: Option<WeeklyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_time: Option<MissingTimeReport>,
}

impl AuditReport {
    pub fn new(filter: RootFilter, families: Vec<Family>) -> Self {
        let summaries: Vec<Summary> = families.iter().map(summarize).collect();
        let stats = HierarchyStats::collect(&families);
        let totals = RunTotals::from_summaries(&summaries);
        let monthly = monthly_summaries(families.iter().map(|f| &f.root));
        AuditReport {
            filter,
            summaries,
            families,
            stats,
            totals,
            monthly,
            weekly: None,
            missing_time: None,
        }
    }

    /// Adds the weekly report over `candidates`, which are roots selected
    /// without the closed-date range.
    pub fn with_weekly<'a>(mut self, range: DateRange, candidates: impl IntoIterator<Item = &'a WorkItem>) -> Self {
        self.weekly = Some(WeeklyReport::new(range, candidates));
        self
    }

    /// Adds the missing-time listing over this report's roots.
    pub fn with_missing_time(mut self, since: DateTime<FixedOffset>) -> Self {
        self.missing_time = Some(MissingTimeReport::new(since, self.families.iter().map(|f| &f.root)));
        self
    }
}
