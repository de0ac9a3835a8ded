// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The input boundary: where root items and child pages come from.

use crate::error::Result;
use crate::filter::RootFilter;
use crate::item::WorkItem;
use crate::raw::RawItem;

/// One page of child records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildPage {
    pub items: Vec<RawItem>,
    /// Cursor for the next page, `None` on the last page.
    pub next_cursor: Option<String>,
}

impl ChildPage {
    pub fn last(items: Vec<RawItem>) -> Self {
        ChildPage {
            items,
            next_cursor: None,
        }
    }
}

/// Supplies root items and paginated child records.
///
/// Implementations own retries and rate-limit waiting. A returned error is
/// final for that call.
pub trait FlatProvider {
    /// Root items accepted by `filter`, in provider order.
    fn list_closed_roots(&self, filter: &RootFilter) -> Result<Vec<WorkItem>>;

    /// One page of `parent`'s direct children, starting at `cursor`.
    fn fetch_children(&self, parent: &WorkItem, cursor: Option<&str>) -> Result<ChildPage>;
}

impl<P: FlatProvider + ?Sized> FlatProvider for &P {
    fn list_closed_roots(&self, filter: &RootFilter) -> Result<Vec<WorkItem>> {
        (**self).list_closed_roots(filter)
    }

    fn fetch_children(&self, parent: &WorkItem, cursor: Option<&str>) -> Result<ChildPage> {
        (**self).fetch_children(parent, cursor)
    }
}
