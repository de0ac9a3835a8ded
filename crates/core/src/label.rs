// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Label-based classification.
//!
//! The validator and the aggregator both classify items through
//! [`has_any_label`], so "what counts as Story-class" is defined once.

use crate::item::WorkItem;

/// Labels that make an item Epic-class.
pub const EPIC_LABELS: &[&str] = &["pbi", "dev-pbi"];

/// Labels that make an item Story-class.
pub const STORY_LABELS: &[&str] = &["sbi", "dev-sbi"];

/// Prefix shared by the difficulty labels (`difficulty:low` etc).
pub const DIFFICULTY_LABEL_PREFIX: &str = "difficulty:";

/// Case-insensitive membership: true if any of the item's labels equals any
/// entry of `set`.
pub fn has_any_label(item: &WorkItem, set: &[&str]) -> bool {
    item.labels
        .iter()
        .any(|label| set.iter().any(|wanted| label.trim().eq_ignore_ascii_case(wanted)))
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
