// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fa-core: Family audit library
//!
//! This crate provides the work item model, the family builder, the
//! completeness rules and the metric aggregation used by the famaudit CLI.
//! Network access lives behind the [`FlatProvider`] trait.

pub mod aggregate;
pub mod error;
pub mod family;
pub mod field;
pub mod filter;
pub mod item;
pub mod label;
pub mod provider;
pub mod raw;
pub mod summary;
pub mod validate;
pub mod zone;

#[cfg(test)]
mod testing;

pub use aggregate::{aggregate, Aggregate};
pub use error::{Error, Result};
pub use family::{BuildReport, Family, FamilyBuilder, MaxDepth, DEFAULT_MAX_DEPTH};
pub use field::{FieldEntry, FieldNames, FieldValue};
pub use filter::RootFilter;
pub use item::{CloseReason, Difficulty, IssueRef, IssueState, Metrics, ParentRef, WorkItem};
pub use provider::{ChildPage, FlatProvider};
pub use raw::{ParseContext, RawItem};
pub use summary::{
    monthly_summaries, summarize, HierarchyStats, MissingTimeReport, MonthlySummary, PersonTotals, RunTotals,
    Summary, TimeEntry, TimeTotals, WeeklyReport, UNASSIGNED,
};
pub use validate::{validate, Clause, Violation};
pub use zone::{ClockSource, DateRange, ReportZone, SystemClock, DEFAULT_UTC_OFFSET_HOURS};
