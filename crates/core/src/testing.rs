// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test fixtures: item builders and a scriptable in-memory provider.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, FixedOffset};

use crate::error::{Error, Result};
use crate::field::FieldEntry;
use crate::filter::RootFilter;
use crate::item::{CloseReason, Metrics, WorkItem};
use crate::provider::{ChildPage, FlatProvider};
use crate::raw::RawItem;

pub fn url(n: u64) -> String {
    format!("https://github.com/acme/app/issues/{}", n)
}

pub fn ts(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

/// An open, unlabeled root item.
pub fn item(n: u64) -> WorkItem {
    WorkItem::new(url(n), format!("Item {}", n), "author", ts("2025-01-01T00:00:00Z"))
}

/// A completed root item.
pub fn completed(n: u64) -> WorkItem {
    item(n).closed(ts("2025-04-15T00:00:00Z"), CloseReason::Completed)
}

/// A completed Epic-class item.
pub fn epic(n: u64, size: Option<f64>) -> WorkItem {
    completed(n).with_labels(["pbi"]).with_metrics(Metrics {
        size,
        ..Metrics::default()
    })
}

/// A completed Story-class item, optionally labeled `difficulty:low`.
pub fn story(n: u64, estimated: Option<f64>, actual: Option<f64>, difficulty: bool) -> WorkItem {
    let labels: &[&str] = if difficulty { &["sbi", "difficulty:low"] } else { &["sbi"] };
    completed(n).with_labels(labels.iter().copied()).with_metrics(Metrics {
        size: None,
        estimated,
        actual,
    })
}

/// Builder for child records; starts as a completed, unlabeled item.
pub struct RawBuilder {
    item: RawItem,
}

pub fn raw(n: u64) -> RawBuilder {
    RawBuilder {
        item: RawItem {
            url: url(n),
            title: format!("Item {}", n),
            author: Some("author".into()),
            state: "CLOSED".into(),
            state_reason: Some("COMPLETED".into()),
            created_at: "2025-01-01T00:00:00Z".into(),
            closed_at: Some("2025-04-15T00:00:00Z".into()),
            ..RawItem::default()
        },
    }
}

impl RawBuilder {
    pub fn labels<I: IntoIterator<Item = &'static str>>(mut self, labels: I) -> Self {
        self.item.labels = labels.into_iter().map(String::from).collect();
        self
    }

    pub fn number(mut self, field: &str, value: f64) -> Self {
        self.item.fields.push(FieldEntry::number(field, value));
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.item.state_reason = Some(reason.into());
        self
    }

    pub fn open(mut self) -> Self {
        self.item.state = "OPEN".into();
        self.item.state_reason = None;
        self.item.closed_at = None;
        self
    }

    pub fn build(self) -> RawItem {
        self.item
    }
}

/// In-memory provider that pages children and records every fetch.
#[derive(Default)]
pub struct FakeProvider {
    roots: Vec<WorkItem>,
    children: HashMap<String, Vec<RawItem>>,
    failing: HashSet<String>,
    page_size: Option<usize>,
    calls: RefCell<Vec<(String, Option<String>)>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: WorkItem) -> Self {
        self.roots.push(root);
        self
    }

    /// Sets the child records of the item numbered `parent`.
    pub fn with_children(mut self, parent: u64, children: Vec<RawItem>) -> Self {
        self.children.insert(url(parent), children);
        self
    }

    /// Makes every fetch for the item numbered `parent` fail.
    pub fn failing(mut self, parent: u64) -> Self {
        self.failing.insert(url(parent));
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Every `(parent url, cursor)` pair fetched so far, in call order.
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.borrow().clone()
    }

    pub fn fetch_count(&self, parent: u64) -> usize {
        let target = url(parent);
        self.calls.borrow().iter().filter(|(u, _)| *u == target).count()
    }
}

impl FlatProvider for FakeProvider {
    fn list_closed_roots(&self, filter: &RootFilter) -> Result<Vec<WorkItem>> {
        Ok(self.roots.iter().filter(|r| filter.accepts(r)).cloned().collect())
    }

    fn fetch_children(&self, parent: &WorkItem, cursor: Option<&str>) -> Result<ChildPage> {
        self.calls
            .borrow_mut()
            .push((parent.url.clone(), cursor.map(String::from)));
        if self.failing.contains(&parent.url) {
            return Err(Error::Provider(format!("fetch failed for {}", parent.url)));
        }

        let all = self.children.get(&parent.url).cloned().unwrap_or_default();
        let start: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
        let size = self.page_size.unwrap_or(all.len().max(1));
        let end = (start + size).min(all.len());
        let next_cursor = (end < all.len()).then(|| end.to_string());
        Ok(ChildPage {
            items: all[start..end].to_vec(),
            next_cursor,
        })
    }
}
