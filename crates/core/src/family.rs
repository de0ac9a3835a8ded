// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Family tree construction.
//!
//! [`FamilyBuilder`] walks a root's descendants depth-first through a
//! [`FlatProvider`]. Each node's child pages are drained before any child is
//! descended into. Only children closed as COMPLETED are kept; a child that
//! is not completed is dropped together with everything beneath it, and the
//! drop is listed in [`BuildReport::pruned`].
//!
//! Two independent bounds keep the walk finite: a visited set of item URLs
//! shared by the whole family, and the [`MaxDepth`] limit.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::item::{CloseReason, IssueState, WorkItem};
use crate::provider::FlatProvider;
use crate::raw::{ParseContext, RawItem};

/// Default recursion limit below a root.
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Number of levels below the root whose children may be fetched.
///
/// Always positive; zero or negative limits are rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaxDepth(u32);

impl MaxDepth {
    pub fn new(value: i64) -> Result<Self> {
        match u32::try_from(value) {
            Ok(depth) if depth > 0 => Ok(MaxDepth(depth)),
            _ => Err(Error::InvalidMaxDepth(value)),
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for MaxDepth {
    fn default() -> Self {
        MaxDepth(DEFAULT_MAX_DEPTH)
    }
}

impl TryFrom<i64> for MaxDepth {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        MaxDepth::new(value)
    }
}

impl fmt::Display for MaxDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A child that was already visited elsewhere in the family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub parent: String,
    pub repeated: String,
}

/// A child dropped because it was not closed as completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pruned {
    pub parent: String,
    pub url: String,
    pub title: String,
    pub state: IssueState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<CloseReason>,
}

/// A node whose children could not be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchFailure {
    pub url: String,
    pub message: String,
}

/// A child record that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Malformed {
    pub parent: String,
    pub url: String,
    pub message: String,
}

/// Everything the builder left out, and why.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Included nodes at the depth limit whose children were not fetched.
    pub truncated: usize,
    pub cycles: Vec<Cycle>,
    pub pruned: Vec<Pruned>,
    pub fetch_errors: Vec<FetchFailure>,
    pub malformed: Vec<Malformed>,
}

impl BuildReport {
    /// True if nothing was excluded other than by the completion rule.
    pub fn is_clean(&self) -> bool {
        self.truncated == 0
            && self.cycles.is_empty()
            && self.fetch_errors.is_empty()
            && self.malformed.is_empty()
    }
}

/// A root item and its materialized descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Family {
    pub root: WorkItem,
    pub report: BuildReport,
}

impl Family {
    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.for_each_node(|_, _| count += 1);
        count
    }

    /// Calls `f` with every node and its depth, parents before children.
    pub fn for_each_node(&self, mut f: impl FnMut(&WorkItem, usize)) {
        fn walk(item: &WorkItem, depth: usize, f: &mut impl FnMut(&WorkItem, usize)) {
            f(item, depth);
            for child in &item.children {
                walk(child, depth + 1, f);
            }
        }
        walk(&self.root, 0, &mut f);
    }
}

/// Builds families from a provider's child pages.
pub struct FamilyBuilder<P> {
    provider: P,
    max_depth: MaxDepth,
    ctx: ParseContext,
}

impl<P: FlatProvider> FamilyBuilder<P> {
    pub fn new(provider: P, max_depth: MaxDepth, ctx: ParseContext) -> Self {
        FamilyBuilder {
            provider,
            max_depth,
            ctx,
        }
    }

    /// Materializes `root`'s descendants. Any children already on `root`
    /// are discarded first.
    pub fn build(&self, mut root: WorkItem) -> Family {
        info!("Building family for {}", root.url);
        root.children.clear();
        let mut visited = HashSet::from([root.url.clone()]);
        let mut report = BuildReport::default();
        self.expand(&mut root, 0, &mut visited, &mut report);
        Family { root, report }
    }

    fn expand(
        &self,
        node: &mut WorkItem,
        depth: u32,
        visited: &mut HashSet<String>,
        report: &mut BuildReport,
    ) {
        if depth >= self.max_depth.get() {
            debug!("Depth limit reached at {} (depth {})", node.url, depth);
            report.truncated += 1;
            return;
        }

        let records = match self.fetch_all(node) {
            Ok(records) => records,
            Err(e) => {
                warn!("Failed to fetch children of {}: {}", node.url, e);
                report.fetch_errors.push(FetchFailure {
                    url: node.url.clone(),
                    message: e.to_string(),
                });
                return;
            }
        };
        debug!("Fetched {} child records for {}", records.len(), node.url);

        for record in records {
            if let Some(child) = self.admit(node, record, visited, report) {
                node.children.push(child);
            }
        }

        for child in &mut node.children {
            self.expand(child, depth + 1, visited, report);
        }
    }

    /// Decides whether one child record joins the tree.
    fn admit(
        &self,
        parent: &WorkItem,
        record: RawItem,
        visited: &mut HashSet<String>,
        report: &mut BuildReport,
    ) -> Option<WorkItem> {
        let url = record.url.clone();
        let child = match record.resolve(&self.ctx) {
            Ok(child) => child,
            Err(e) => {
                warn!("Skipping malformed child {} of {}: {}", url, parent.url, e);
                report.malformed.push(Malformed {
                    parent: parent.url.clone(),
                    url,
                    message: e.to_string(),
                });
                return None;
            }
        };

        if visited.contains(&child.url) {
            warn!("Cycle detected: {} repeats under {}", child.url, parent.url);
            report.cycles.push(Cycle {
                parent: parent.url.clone(),
                repeated: child.url,
            });
            return None;
        }

        if !child.is_completed() {
            debug!("Pruning {} under {} ({})", child.url, parent.url, child.state);
            report.pruned.push(Pruned {
                parent: parent.url.clone(),
                url: child.url,
                title: child.title,
                state: child.state,
                close_reason: child.close_reason,
            });
            return None;
        }

        visited.insert(child.url.clone());
        Some(child)
    }

    /// Drains every page of `parent`'s children.
    fn fetch_all(&self, parent: &WorkItem) -> Result<Vec<RawItem>> {
        let mut records = Vec::new();
        let mut seen_cursors = HashSet::new();
        let mut cursor: Option<String> = None;
        loop {
            let page = self.provider.fetch_children(parent, cursor.as_deref())?;
            records.extend(page.items);
            match page.next_cursor {
                None => return Ok(records),
                Some(next) => {
                    if !seen_cursors.insert(next.clone()) {
                        return Err(Error::Provider(format!(
                            "pagination cursor '{}' repeated for {}",
                            next, parent.url
                        )));
                    }
                    cursor = Some(next);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "family_tests.rs"]
mod tests;
