// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Metric aggregation over a family subtree.

use serde::Serialize;

use crate::item::WorkItem;
use crate::validate::{validate, Violation};

/// Totals over every node beneath a root (the root itself excluded).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregate {
    pub descendant_count: usize,
    /// Sum of set estimates of Story-class descendants.
    pub total_estimated: f64,
    /// Sum of set actual times of Story-class descendants.
    pub total_actual: f64,
    /// Violations of descendants, parents before children.
    pub violations: Vec<Violation>,
}

/// Walks the materialized subtree beneath `root`.
///
/// Only Story-class nodes contribute time, and only for fields that are set.
/// Values are summed in sorted order so the result does not depend on the
/// order children were delivered in.
pub fn aggregate(root: &WorkItem) -> Aggregate {
    let mut estimated = Vec::new();
    let mut actual = Vec::new();
    let mut out = Aggregate::default();

    let mut stack: Vec<&WorkItem> = root.children.iter().rev().collect();
    while let Some(node) = stack.pop() {
        out.descendant_count += 1;
        if node.is_story() {
            estimated.extend(node.metrics.estimated);
            actual.extend(node.metrics.actual);
        }
        if let Some(violation) = validate(node) {
            out.violations.push(violation);
        }
        stack.extend(node.children.iter().rev());
    }

    out.total_estimated = canonical_sum(estimated);
    out.total_actual = canonical_sum(actual);
    out
}

/// Sums `values` in IEEE total order.
pub(crate) fn canonical_sum(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    values.into_iter().fold(0.0, |acc, v| acc + v)
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
