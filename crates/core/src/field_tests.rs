// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn from_fields_picks_configured_numbers() {
    let entries = vec![
        FieldEntry::number("Size", 5.0),
        FieldEntry::number("見積時間", 4.0),
        FieldEntry::number("実績時間", 3.5),
        FieldEntry::number("Priority", 1.0),
    ];
    let metrics = Metrics::from_fields(&entries, &FieldNames::default());
    assert_eq!(metrics.size, Some(5.0));
    assert_eq!(metrics.estimated, Some(4.0));
    assert_eq!(metrics.actual, Some(3.5));
}

#[test]
fn from_fields_leaves_missing_fields_unset() {
    let entries = vec![FieldEntry::number("Size", 3.0)];
    let metrics = Metrics::from_fields(&entries, &FieldNames::default());
    assert_eq!(metrics.estimated, None);
    assert_eq!(metrics.actual, None);
}

#[test]
fn from_fields_keeps_zero_distinct_from_unset() {
    let entries = vec![FieldEntry::number("見積時間", 0.0)];
    let metrics = Metrics::from_fields(&entries, &FieldNames::default());
    assert_eq!(metrics.estimated, Some(0.0));
    assert_eq!(metrics.actual, None);
}

#[test]
fn from_fields_ignores_non_number_values() {
    let entries = vec![
        FieldEntry::new("Size", FieldValue::Text("5".into())),
        FieldEntry::new("見積時間", FieldValue::SingleSelect("M".into())),
    ];
    let metrics = Metrics::from_fields(&entries, &FieldNames::default());
    assert_eq!(metrics, Metrics::default());
}

#[test]
fn from_fields_last_number_wins() {
    let entries = vec![FieldEntry::number("Size", 1.0), FieldEntry::number("Size", 8.0)];
    let metrics = Metrics::from_fields(&entries, &FieldNames::default());
    assert_eq!(metrics.size, Some(8.0));
}

#[test]
fn from_fields_uses_custom_names() {
    let names = FieldNames {
        size: "Points".into(),
        estimated: "Estimate".into(),
        actual: "Spent".into(),
    };
    let entries = vec![
        FieldEntry::number("Points", 2.0),
        FieldEntry::number("Size", 9.0),
        FieldEntry::number("Spent", 1.5),
    ];
    let metrics = Metrics::from_fields(&entries, &names);
    assert_eq!(metrics.size, Some(2.0));
    assert_eq!(metrics.estimated, None);
    assert_eq!(metrics.actual, Some(1.5));
}
