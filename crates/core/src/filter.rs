// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Root selection.
//!
//! Providers may pre-filter on the server, but every provider runs its
//! candidates through [`RootFilter::accepts`] so roots are selected the same
//! way regardless of where they came from.

use serde::Serialize;

use crate::item::{IssueRef, WorkItem};
use crate::zone::DateRange;

/// Which root items a run reports on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RootFilter {
    /// Repository names (without owner). Empty allows every repository.
    pub repositories: Vec<String>,
    /// Half-open range the root's closed-at must fall in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_range: Option<DateRange>,
}

impl RootFilter {
    pub fn new<I, S>(repositories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RootFilter {
            repositories: repositories.into_iter().map(Into::into).collect(),
            closed_range: None,
        }
    }

    /// Restricts roots to those closed within `range` (builder pattern).
    pub fn closed_within(mut self, range: DateRange) -> Self {
        self.closed_range = Some(range);
        self
    }

    /// True if `item` is a completed root in an allowed repository, closed
    /// within the configured range.
    ///
    /// With a range set, an item without a closed-at timestamp is rejected.
    pub fn accepts(&self, item: &WorkItem) -> bool {
        if !item.is_root() || !item.is_completed() {
            return false;
        }
        if !self.allows_repository(&item.url) {
            return false;
        }
        match (&self.closed_range, &item.closed_at) {
            (None, _) => true,
            (Some(range), Some(closed_at)) => range.contains(closed_at),
            (Some(_), None) => false,
        }
    }

    /// Matches the repository segment of an issue URL against the allow-list.
    pub fn allows_repository(&self, url: &str) -> bool {
        if self.repositories.is_empty() {
            return true;
        }
        match IssueRef::parse(url) {
            Ok(issue) => self.repositories.iter().any(|r| r.trim() == issue.repo),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
