// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Custom project field values.
//!
//! The tracker reports field values in several shapes depending on the field
//! type. They are resolved into [`FieldValue`] once, at parse time; only
//! [`FieldValue::Number`] entries can populate [`Metrics`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::item::Metrics;

/// Default name of the size field.
pub const DEFAULT_SIZE_FIELD: &str = "Size";
/// Default name of the estimated time field.
pub const DEFAULT_ESTIMATED_FIELD: &str = "見積時間";
/// Default name of the actual time field.
pub const DEFAULT_ACTUAL_FIELD: &str = "実績時間";

/// A resolved custom field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Date(NaiveDate),
    SingleSelect(String),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A field value together with the name of the field it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEntry {
    pub field: String,
    pub value: FieldValue,
}

impl FieldEntry {
    pub fn new(field: impl Into<String>, value: FieldValue) -> Self {
        FieldEntry {
            field: field.into(),
            value,
        }
    }

    pub fn number(field: impl Into<String>, value: f64) -> Self {
        FieldEntry::new(field, FieldValue::Number(value))
    }
}

/// Names of the numeric fields that map onto [`Metrics`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    pub size: String,
    pub estimated: String,
    pub actual: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        FieldNames {
            size: DEFAULT_SIZE_FIELD.to_string(),
            estimated: DEFAULT_ESTIMATED_FIELD.to_string(),
            actual: DEFAULT_ACTUAL_FIELD.to_string(),
        }
    }
}

impl Metrics {
    /// Picks the configured numeric fields out of `entries`.
    ///
    /// Non-number entries never populate a metric, even when their field name
    /// matches. When a field appears more than once the last number wins.
    pub fn from_fields(entries: &[FieldEntry], names: &FieldNames) -> Metrics {
        let mut metrics = Metrics::default();
        for entry in entries {
            let Some(n) = entry.value.as_number() else {
                continue;
            };
            if entry.field == names.size {
                metrics.size = Some(n);
            } else if entry.field == names.estimated {
                metrics.estimated = Some(n);
            } else if entry.field == names.actual {
                metrics.actual = Some(n);
            }
        }
        metrics
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
