// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Unvalidated item records as delivered by a provider.
//!
//! A [`RawItem`] keeps timestamps and state as strings. [`RawItem::resolve`]
//! turns it into a [`WorkItem`] in the report zone, or fails with the error
//! that makes the record malformed.

use serde::Serialize;

use crate::error::Result;
use crate::field::{FieldEntry, FieldNames};
use crate::item::{CloseReason, IssueState, Metrics, ParentRef, WorkItem};
use crate::zone::ReportZone;

/// Everything needed to turn raw records into work items.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub zone: ReportZone,
    pub fields: FieldNames,
}

impl ParseContext {
    pub fn new(zone: ReportZone, fields: FieldNames) -> Self {
        ParseContext { zone, fields }
    }
}

/// A child record as returned by a provider page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawItem {
    pub url: String,
    pub title: String,
    /// Missing for items opened by deleted accounts.
    pub author: Option<String>,
    pub assignees: Vec<String>,
    pub labels: Vec<String>,
    pub state: String,
    pub state_reason: Option<String>,
    pub created_at: String,
    pub closed_at: Option<String>,
    pub parent_id: Option<String>,
    pub fields: Vec<FieldEntry>,
}

/// Author shown for items whose author account no longer exists.
pub const GHOST_AUTHOR: &str = "ghost";

impl RawItem {
    /// Parses state and timestamps and resolves custom fields.
    pub fn resolve(self, ctx: &ParseContext) -> Result<WorkItem> {
        let state: IssueState = self.state.parse()?;
        let created_at = ctx.zone.parse_timestamp("createdAt", &self.created_at)?;
        let closed_at = match self.closed_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(ctx.zone.parse_timestamp("closedAt", raw)?),
        };
        let close_reason = self.state_reason.as_deref().and_then(CloseReason::parse);
        let metrics = Metrics::from_fields(&self.fields, &ctx.fields);

        let mut item = WorkItem::new(
            self.url,
            self.title,
            self.author.unwrap_or_else(|| GHOST_AUTHOR.to_string()),
            created_at,
        )
        .with_labels(self.labels)
        .with_assignees(self.assignees)
        .with_metrics(metrics);
        item.state = state;
        item.closed_at = closed_at;
        item.close_reason = close_reason;
        if let Some(id) = self.parent_id.filter(|id| !id.is_empty()) {
            item = item.with_parent(ParentRef::new(id));
        }
        Ok(item)
    }
}

#[cfg(test)]
#[path = "raw_tests.rs"]
mod tests;
