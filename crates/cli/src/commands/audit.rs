// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use tracing::info;

use fa_core::{FamilyBuilder, FlatProvider, MaxDepth, ParseContext, RootFilter, SystemClock, WorkItem};
use fa_github::{GithubProvider, GraphQlClient};

use crate::cli::AuditArgs;
use crate::display::render_report;
use crate::error::Result;
use crate::report::{AuditReport, ReportPeriods};

pub fn run(config_path: Option<&Path>, args: &AuditArgs) -> Result<()> {
    let settings = super::load_settings(config_path, args.settings())?;
    let config = settings.resolve_audit(&SystemClock)?;

    let client = GraphQlClient::new(config.endpoint, config.token)?;
    let provider = GithubProvider::new(client, config.org, config.project, config.ctx.clone());

    let report = build_report(&provider, config.filter, config.periods, config.max_depth, config.ctx)?;
    println!("{}", render_report(&report, args.format, args.show_pruned)?);
    Ok(())
}

/// Selects the roots, builds one family per root and summarizes them.
///
/// Roots are listed once without the closed-date range. The range then
/// selects the audited roots, while the weekly report sees every candidate.
pub(crate) fn build_report<P: FlatProvider>(
    provider: P,
    filter: RootFilter,
    periods: ReportPeriods,
    max_depth: MaxDepth,
    ctx: ParseContext,
) -> Result<AuditReport> {
    let unbounded = RootFilter {
        closed_range: None,
        ..filter.clone()
    };
    let candidates = crate::time_phase!("audit::roots", { provider.list_closed_roots(&unbounded)? });
    let roots: Vec<WorkItem> = candidates.iter().filter(|r| filter.accepts(r)).cloned().collect();
    info!(
        "Auditing {} of {} roots (max depth {})",
        roots.len(),
        candidates.len(),
        max_depth
    );

    let builder = FamilyBuilder::new(provider, max_depth, ctx);
    let families: Vec<_> = crate::time_phase!("audit::families", {
        roots.into_iter().map(|root| builder.build(root)).collect()
    });

    let mut report = crate::time_phase!("audit::summarize", { AuditReport::new(filter, families) });
    if let Some(range) = periods.weekly {
        info!("Weekly report for {} to {}", range.start.date_naive(), range.last_day());
        report = report.with_weekly(range, &candidates);
    }
    if let Some(since) = periods.created_since {
        report = report.with_missing_time(since);
    }
    Ok(report)
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
