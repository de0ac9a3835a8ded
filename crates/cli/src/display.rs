// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report rendering.
//!
//! Every formatter builds a `Vec<String>` of lines; the `render_*` functions
//! join them. Nothing here prints.

use serde::Serialize;

use fa_core::{
    Family, HierarchyStats, Metrics, MissingTimeReport, MonthlySummary, RunTotals, Summary, TimeEntry,
    TimeTotals, WeeklyReport, WorkItem,
};

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::report::AuditReport;

const SUMMARY_HEADERS: [&str; 7] = ["#", "Title", "Size", "Estimated", "Actual", "Items", "Violations"];
const MONTHLY_HEADERS: [&str; 5] = ["Month", "Issues", "Estimated", "Actual", "Ratio"];
const PERSON_HEADERS: [&str; 6] = ["Person", "Issues", "Estimated", "Actual", "Ratio", "Missing"];

/// Formats an optional metric with one decimal, `-` when unset.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "-".to_string(),
    }
}

fn format_metrics(metrics: &Metrics) -> String {
    let mut parts = Vec::new();
    if let Some(size) = metrics.size {
        parts.push(format!("size {:.1}", size));
    }
    if let Some(estimated) = metrics.estimated {
        parts.push(format!("est {:.1}", estimated));
    }
    if let Some(actual) = metrics.actual {
        parts.push(format!("act {:.1}", actual));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" [{}]", parts.join(", "))
    }
}

/// One line for an item: `#12: Title [size 3.0]`.
pub fn format_item_line(item: &WorkItem) -> String {
    format!(
        "#{}: {}{}",
        item.display_number(),
        item.title,
        format_metrics(&item.metrics)
    )
}

/// The family as an indented tree, root first.
pub fn format_family_tree(root: &WorkItem) -> Vec<String> {
    let mut lines = vec![format_item_line(root)];
    push_children(&mut lines, &root.children, "");
    lines
}

fn push_children(lines: &mut Vec<String>, children: &[WorkItem], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, format_item_line(child)));

        let child_prefix = if is_last {
            format!("{}    ", prefix)
        } else {
            format!("{}│   ", prefix)
        };
        push_children(lines, &child.children, &child_prefix);
    }
}

fn summary_rows(summaries: &[Summary], totals: &RunTotals) -> Vec<[String; 7]> {
    let mut rows: Vec<[String; 7]> = summaries
        .iter()
        .map(|s| {
            [
                s.number.map_or_else(|| "?".to_string(), |n| n.to_string()),
                s.title.clone(),
                format_metric(s.size),
                format!("{:.1}", s.total_estimated),
                format!("{:.1}", s.total_actual),
                s.descendant_count.to_string(),
                s.violations.len().to_string(),
            ]
        })
        .collect();
    rows.push([
        String::new(),
        "Total".to_string(),
        format!("{:.1}", totals.total_size),
        format!("{:.1}", totals.total_estimated),
        format!("{:.1}", totals.total_actual),
        String::new(),
        totals.violation_count.to_string(),
    ]);
    rows
}

/// Pads `cells` to `widths`. Column `left` is left-aligned, the rest
/// right-aligned.
fn pad_row(cells: &[String], widths: &[usize], left: usize) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let fill = width.saturating_sub(cell.chars().count());
            if i == left {
                format!("{}{}", cell, " ".repeat(fill))
            } else {
                format!("{}{}", " ".repeat(fill), cell)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Fixed-width summary table with a totals row.
pub fn format_summary_table(summaries: &[Summary], totals: &RunTotals) -> Vec<String> {
    let rows = summary_rows(summaries, totals);
    let mut widths = SUMMARY_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = SUMMARY_HEADERS.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = vec![pad_row(&header, &widths, 1), pad_row(&rule, &widths, 1)];
    let total_index = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        if i == total_index {
            lines.push(pad_row(&rule, &widths, 1));
        }
        lines.push(pad_row(row, &widths, 1));
    }
    lines
}

/// A plain table with the first column left-aligned: fixed-width for text,
/// pipe-delimited for Markdown.
fn format_table(headers: &[&str], rows: &[Vec<String>], format: OutputFormat) -> Vec<String> {
    if format == OutputFormat::Markdown {
        let mut lines = vec![
            format!("| {} |", headers.join(" | ")),
            format!("|:---|{}", "---:|".repeat(headers.len().saturating_sub(1))),
        ];
        for row in rows {
            let cells: Vec<String> = row.iter().map(|cell| cell.replace('|', "\\|")).collect();
            lines.push(format!("| {} |", cells.join(" | ")));
        }
        return lines;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut lines = vec![pad_row(&header, &widths, 0), pad_row(&rule, &widths, 0)];
    lines.extend(rows.iter().map(|row| pad_row(row, &widths, 0)));
    lines
}

fn format_ratio(ratio: Option<f64>) -> String {
    ratio.map_or_else(|| "-".to_string(), |r| format!("{:.2}", r))
}

/// Closed roots per month, oldest first.
pub fn format_monthly(monthly: &[MonthlySummary], format: OutputFormat) -> Vec<String> {
    let rows: Vec<Vec<String>> = monthly
        .iter()
        .map(|m| {
            vec![
                m.month.clone(),
                m.totals.issues.to_string(),
                format!("{:.1}", m.totals.total_estimated),
                format!("{:.1}", m.totals.total_actual),
                format_ratio(m.totals.ratio),
            ]
        })
        .collect();
    format_table(&MONTHLY_HEADERS, &rows, format)
}

fn entry_label(entry: &TimeEntry, format: OutputFormat) -> String {
    let number = entry.number.map_or_else(|| "?".to_string(), |n| n.to_string());
    match format {
        OutputFormat::Markdown => format!("[#{}: {}]({})", number, entry.title.replace(']', "\\]"), entry.url),
        _ => format!("#{}: {}", number, entry.title),
    }
}

fn format_time_totals(totals: &TimeTotals) -> Vec<String> {
    vec![
        format!(
            "Issues: {}  With estimate: {}  With actual: {}",
            totals.issues, totals.with_estimate, totals.with_actual
        ),
        format!(
            "Estimated: {:.1}  Actual: {:.1}  Actual/Estimated: {}",
            totals.total_estimated,
            totals.total_actual,
            format_ratio(totals.ratio)
        ),
        format!(
            "Average estimated: {}  Average actual: {}",
            format_metric(totals.average_estimated),
            format_metric(totals.average_actual)
        ),
    ]
}

/// Heading for the weekly section: `Weekly Time Summary (first to last)`.
pub fn weekly_heading(weekly: &WeeklyReport) -> String {
    format!(
        "Weekly Time Summary ({} to {})",
        weekly.range.start.date_naive(),
        weekly.range.last_day()
    )
}

/// Body of the weekly section: totals, the closed roots, then the
/// per-person table and each person's roots missing time.
pub fn format_weekly(weekly: &WeeklyReport, format: OutputFormat) -> Vec<String> {
    if weekly.entries.is_empty() {
        return vec!["No roots closed during this period".to_string()];
    }

    let mut lines = format_time_totals(&weekly.totals);
    lines.push(String::new());
    for (i, entry) in weekly.entries.iter().enumerate() {
        let closed = entry
            .closed_at
            .map_or_else(|| "-".to_string(), |c| c.date_naive().to_string());
        lines.push(format!(
            "{}. {} - Closed: {} - Est/Act: {}/{}",
            i + 1,
            entry_label(entry, format),
            closed,
            format_metric(entry.estimated),
            format_metric(entry.actual)
        ));
    }

    lines.push(String::new());
    lines.push(match format {
        OutputFormat::Markdown => "### By Person".to_string(),
        _ => "By Person".to_string(),
    });
    if format == OutputFormat::Markdown {
        lines.push(String::new());
    }
    let rows: Vec<Vec<String>> = weekly
        .rows()
        .map(|p| {
            vec![
                p.person.clone(),
                p.totals.issues.to_string(),
                format!("{:.1}", p.totals.total_estimated),
                format!("{:.1}", p.totals.total_actual),
                format_ratio(p.totals.ratio),
                p.missing_time.to_string(),
            ]
        })
        .collect();
    lines.extend(format_table(&PERSON_HEADERS, &rows, format));

    for person in weekly.rows().filter(|p| p.missing_time > 0) {
        lines.push(String::new());
        lines.push(format!("Missing time for {}:", person.person));
        for entry in person.entries.iter().filter(|e| e.is_missing_time()) {
            lines.push(format!(
                "- {} (Est/Act: {}/{})",
                entry_label(entry, format),
                format_metric(entry.estimated),
                format_metric(entry.actual)
            ));
        }
    }
    lines
}

/// Heading for the missing-time section.
pub fn missing_time_heading(report: &MissingTimeReport) -> String {
    format!("Missing Time Since {}", report.since.date_naive())
}

/// Roots created since the cut-off that lack estimated or actual time,
/// bucketed by what is missing.
pub fn format_missing_time(report: &MissingTimeReport, format: OutputFormat) -> Vec<String> {
    if report.checked == 0 {
        return vec![format!("No roots created on or after {}", report.since.date_naive())];
    }

    let mut lines = Vec::new();
    let buckets = [
        ("Estimated and actual missing", &report.missing_both),
        ("Estimated missing", &report.missing_estimated),
        ("Actual missing", &report.missing_actual),
    ];
    for (label, entries) in buckets {
        if entries.is_empty() {
            continue;
        }
        lines.push(format!("{} ({}):", label, entries.len()));
        for entry in entries.iter() {
            lines.push(format!(
                "- {} - Created: {}",
                entry_label(entry, format),
                entry.created_at.date_naive()
            ));
        }
    }
    let percent = report.missing_percent().unwrap_or(0.0);
    lines.push(format!(
        "Missing: {} of {} ({:.1}%)",
        report.missing(),
        report.checked,
        percent
    ));
    lines
}

/// Markdown table with a bold totals row.
pub fn format_summary_markdown(summaries: &[Summary], totals: &RunTotals) -> Vec<String> {
    let rows = summary_rows(summaries, totals);
    let total_index = rows.len() - 1;

    let mut lines = vec![
        format!("| {} |", SUMMARY_HEADERS.join(" | ")),
        "|---:|:---|---:|---:|---:|---:|---:|".to_string(),
    ];
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| {
                let escaped = cell.replace('|', "\\|");
                if i == total_index && !escaped.is_empty() {
                    format!("**{}**", escaped)
                } else {
                    escaped
                }
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines
}

/// Violations grouped by root, each with its responsible parties.
pub fn format_violations(summaries: &[Summary]) -> Vec<String> {
    let mut lines = Vec::new();
    for summary in summaries.iter().filter(|s| s.has_violations()) {
        let number = summary.number.map_or_else(|| "?".to_string(), |n| n.to_string());
        lines.push(format!("#{}: {}", number, summary.title));
        for violation in &summary.violations {
            lines.push(format!(
                "  - {} {} (@{})",
                violation,
                violation.title,
                violation.responsible.join(", @")
            ));
        }
    }
    lines
}

/// Node counts per depth and totals across all families.
pub fn format_stats(stats: &HierarchyStats) -> Vec<String> {
    let mut lines = vec![
        format!("Families: {}", stats.families),
        format!("Nodes: {} ({} descendants)", stats.total_nodes, stats.descendants),
    ];
    for (depth, count) in stats.per_depth.iter().enumerate() {
        lines.push(format!("  depth {}: {}", depth, count));
    }
    lines
}

/// Everything the builder left out. Pruned children are listed only when
/// `show_pruned` is set; their count is always shown.
pub fn format_diagnostics(families: &[Family], stats: &HierarchyStats, show_pruned: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Truncated: {}  Pruned: {}  Cycles: {}  Fetch errors: {}  Malformed: {}",
        stats.truncated, stats.pruned, stats.cycles, stats.fetch_errors, stats.malformed
    )];

    for family in families {
        let report = &family.report;
        for cycle in &report.cycles {
            lines.push(format!("  cycle: {} -> {}", cycle.parent, cycle.repeated));
        }
        for failure in &report.fetch_errors {
            lines.push(format!("  fetch error: {}: {}", failure.url, failure.message));
        }
        for bad in &report.malformed {
            lines.push(format!("  malformed: {} (under {}): {}", bad.url, bad.parent, bad.message));
        }
        if show_pruned {
            for pruned in &report.pruned {
                let reason = pruned
                    .close_reason
                    .map_or_else(|| pruned.state.to_string(), |r| format!("{} {}", pruned.state, r));
                lines.push(format!("  pruned: {} {} ({})", pruned.url, pruned.title, reason));
            }
        }
    }
    lines
}

fn ratio_line(totals: &RunTotals) -> String {
    match totals.actual_ratio {
        Some(ratio) => format!(
            "Roots: {}  With violations: {}  Actual/Estimated: {:.2}",
            totals.roots, totals.roots_with_violations, ratio
        ),
        None => format!(
            "Roots: {}  With violations: {}",
            totals.roots, totals.roots_with_violations
        ),
    }
}

/// Plain-text audit report.
pub fn render_text(report: &AuditReport, show_pruned: bool) -> String {
    let mut out = Vec::new();

    out.push("Hierarchy".to_string());
    for family in &report.families {
        out.extend(format_family_tree(&family.root));
    }
    if report.families.is_empty() {
        out.push("(no roots matched)".to_string());
    }

    out.push(String::new());
    out.push("Summary".to_string());
    out.extend(format_summary_table(&report.summaries, &report.totals));
    out.push(ratio_line(&report.totals));

    let violations = format_violations(&report.summaries);
    if !violations.is_empty() {
        out.push(String::new());
        out.push("Violations".to_string());
        out.extend(violations);
    }

    if !report.monthly.is_empty() {
        out.push(String::new());
        out.push("Monthly Summary".to_string());
        out.extend(format_monthly(&report.monthly, OutputFormat::Text));
    }

    if let Some(weekly) = &report.weekly {
        out.push(String::new());
        out.push(weekly_heading(weekly));
        out.extend(format_weekly(weekly, OutputFormat::Text));
    }

    if let Some(missing) = &report.missing_time {
        out.push(String::new());
        out.push(missing_time_heading(missing));
        out.extend(format_missing_time(missing, OutputFormat::Text));
    }

    out.push(String::new());
    out.push("Statistics".to_string());
    out.extend(format_stats(&report.stats));
    out.extend(format_diagnostics(&report.families, &report.stats, show_pruned));

    out.join("\n")
}

/// Markdown audit report.
pub fn render_markdown(report: &AuditReport, show_pruned: bool) -> String {
    let mut out = vec!["## Hierarchy".to_string(), String::new(), "```".to_string()];
    for family in &report.families {
        out.extend(format_family_tree(&family.root));
    }
    out.push("```".to_string());

    out.push(String::new());
    out.push("## Summary".to_string());
    out.push(String::new());
    out.extend(format_summary_markdown(&report.summaries, &report.totals));
    out.push(String::new());
    out.push(ratio_line(&report.totals));

    let violations = format_violations(&report.summaries);
    if !violations.is_empty() {
        out.push(String::new());
        out.push("## Violations".to_string());
        out.push(String::new());
        for line in violations {
            // Root headings become list items; their entries nest under them.
            match line.strip_prefix("  ") {
                Some(entry) => out.push(format!("  {}", entry)),
                None => out.push(format!("- {}", line)),
            }
        }
    }

    if !report.monthly.is_empty() {
        out.push(String::new());
        out.push("## Monthly Summary".to_string());
        out.push(String::new());
        out.extend(format_monthly(&report.monthly, OutputFormat::Markdown));
    }

    if let Some(weekly) = &report.weekly {
        out.push(String::new());
        out.push(format!("## {}", weekly_heading(weekly)));
        out.push(String::new());
        out.extend(format_weekly(weekly, OutputFormat::Markdown));
    }

    if let Some(missing) = &report.missing_time {
        out.push(String::new());
        out.push(format!("## {}", missing_time_heading(missing)));
        out.push(String::new());
        out.extend(format_missing_time(missing, OutputFormat::Markdown));
    }

    out.push(String::new());
    out.push("## Statistics".to_string());
    out.push(String::new());
    out.push("```".to_string());
    out.extend(format_stats(&report.stats));
    out.extend(format_diagnostics(&report.families, &report.stats, show_pruned));
    out.push("```".to_string());

    out.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summaries: &'a [Summary],
    families: &'a [Family],
    stats: &'a HierarchyStats,
    totals: &'a RunTotals,
    monthly: &'a [MonthlySummary],
    #[serde(skip_serializing_if = "Option::is_none")]
    weekly: Option<&'a WeeklyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    missing_time: Option<&'a MissingTimeReport>,
}

/// JSON audit report. The weekly and missing-time sections appear only
/// when requested.
pub fn render_json(report: &AuditReport) -> Result<String> {
    let json = JsonReport {
        summaries: &report.summaries,
        families: &report.families,
        stats: &report.stats,
        totals: &report.totals,
        monthly: &report.monthly,
        weekly: report.weekly.as_ref(),
        missing_time: report.missing_time.as_ref(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Renders an audit report in `format`.
pub fn render_report(report: &AuditReport, format: OutputFormat, show_pruned: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report, show_pruned)),
        OutputFormat::Markdown => Ok(render_markdown(report, show_pruned)),
        OutputFormat::Json => render_json(report),
    }
}

/// Renders a single family for `famaudit tree`.
pub fn render_family(family: &Family, summary: &Summary, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        #[derive(Serialize)]
        struct JsonFamily<'a> {
            family: &'a Family,
            summary: &'a Summary,
        }
        return Ok(serde_json::to_string_pretty(&JsonFamily { family, summary })?);
    }

    let mut out = format_family_tree(&family.root);
    out.push(String::new());
    out.push(format!(
        "Items: {}  Estimated: {:.1}  Actual: {:.1}  Violations: {}",
        summary.descendant_count,
        summary.total_estimated,
        summary.total_actual,
        summary.violations.len()
    ));
    for violation in &summary.violations {
        out.push(format!("  - {} (@{})", violation, violation.responsible.join(", @")));
    }
    let stats = HierarchyStats::collect([family]);
    if !family.report.is_clean() {
        out.extend(format_diagnostics(std::slice::from_ref(family), &stats, false));
    }

    if format == OutputFormat::Markdown {
        out.insert(0, "```".to_string());
        out.push("```".to_string());
    }
    Ok(out.join("\n"))
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
