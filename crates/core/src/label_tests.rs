// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::testing::item;
use yare::parameterized;

#[parameterized(
    exact = { &["pbi"], EPIC_LABELS, true },
    upper = { &["PBI"], EPIC_LABELS, true },
    mixed_dev = { &["Dev-Pbi"], EPIC_LABELS, true },
    padded = { &[" sbi "], STORY_LABELS, true },
    story_is_not_epic = { &["sbi"], EPIC_LABELS, false },
    substring_is_not_a_match = { &["pbi-candidate"], EPIC_LABELS, false },
    no_labels = { &[], STORY_LABELS, false },
)]
fn has_any_label_matches_case_insensitively(labels: &[&str], set: &[&str], expected: bool) {
    let item = item(1).with_labels(labels.iter().copied());
    assert_eq!(has_any_label(&item, set), expected);
}

#[test]
fn has_any_label_with_empty_set_is_false() {
    let item = item(1).with_labels(["pbi"]);
    assert!(!has_any_label(&item, &[]));
}
