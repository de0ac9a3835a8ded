// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Data-completeness rules for a single item.

use std::fmt;

use serde::Serialize;

use crate::item::WorkItem;

/// One failed completeness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    SizeMissing,
    EstimatedMissing,
    ActualMissing,
    DifficultyMissing,
}

impl Clause {
    pub fn as_str(&self) -> &'static str {
        match self {
            Clause::SizeMissing => "Size missing",
            Clause::EstimatedMissing => "Estimated missing",
            Clause::ActualMissing => "Actual missing",
            Clause::DifficultyMissing => "Difficulty missing",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// All failed checks for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    pub title: String,
    /// Assignees, or the author when nobody is assigned. Never empty.
    pub responsible: Vec<String>,
    /// Never empty.
    pub clauses: Vec<Clause>,
}

impl Violation {
    /// The clauses joined in evaluation order.
    pub fn reason(&self) -> String {
        self.clauses
            .iter()
            .map(Clause::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.number {
            Some(n) => write!(f, "#{}: {}", n, self.reason()),
            None => write!(f, "#?: {}", self.reason()),
        }
    }
}

/// Checks `item` against the rules for its classification.
///
/// Epic-class items need a size. Story-class items need an estimate, an
/// actual time and a difficulty label; having several difficulty labels is
/// not checked. An item in both classes is held to both rule sets.
pub fn validate(item: &WorkItem) -> Option<Violation> {
    let mut clauses = Vec::new();

    if item.is_epic() && item.metrics.size.is_none() {
        clauses.push(Clause::SizeMissing);
    }

    if item.is_story() {
        if item.metrics.estimated.is_none() {
            clauses.push(Clause::EstimatedMissing);
        }
        if item.metrics.actual.is_none() {
            clauses.push(Clause::ActualMissing);
        }
        if item.difficulty().is_none() {
            clauses.push(Clause::DifficultyMissing);
        }
    }

    if clauses.is_empty() {
        return None;
    }

    Some(Violation {
        url: item.url.clone(),
        number: item.number(),
        title: item.title.clone(),
        responsible: item.responsible(),
        clauses,
    })
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
