// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core work item types.
//!
//! This module contains the fundamental data types: WorkItem, IssueState,
//! CloseReason, Difficulty, Metrics and IssueRef.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::label::{self, DIFFICULTY_LABEL_PREFIX, EPIC_LABELS, STORY_LABELS};

/// Open/closed state reported by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

impl IssueState {
    /// Returns the string representation used by the tracker API.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueState::Open => "OPEN",
            IssueState::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(IssueState::Open),
            "CLOSED" => Ok(IssueState::Closed),
            _ => Err(Error::InvalidState(s.to_string())),
        }
    }
}

/// Why a closed item was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloseReason {
    /// Work was finished.
    Completed,
    /// Closed without doing the work.
    NotPlanned,
    /// Closed as a duplicate of another item.
    Duplicate,
    /// Reported for items that were reopened after being closed.
    Reopened,
    /// Any reason this tool does not know about.
    Other,
}

impl CloseReason {
    /// Returns the string representation used by the tracker API.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Completed => "COMPLETED",
            CloseReason::NotPlanned => "NOT_PLANNED",
            CloseReason::Duplicate => "DUPLICATE",
            CloseReason::Reopened => "REOPENED",
            CloseReason::Other => "OTHER",
        }
    }

    /// Maps a raw `stateReason` value. Empty strings mean "no reason".
    pub fn parse(raw: &str) -> Option<CloseReason> {
        match raw.trim().to_uppercase().as_str() {
            "" => None,
            "COMPLETED" => Some(CloseReason::Completed),
            "NOT_PLANNED" => Some(CloseReason::NotPlanned),
            "DUPLICATE" => Some(CloseReason::Duplicate),
            "REOPENED" => Some(CloseReason::Reopened),
            _ => Some(CloseReason::Other),
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task difficulty, carried as a `difficulty:<level>` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Medium, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Low => "low",
            Difficulty::Medium => "medium",
            Difficulty::High => "high",
        }
    }

    /// The label that marks an item with this difficulty.
    pub fn label(&self) -> String {
        format!("{}{}", DIFFICULTY_LABEL_PREFIX, self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    /// Accepts either the bare level (`low`) or the full label (`difficulty:low`).
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let level = lower.strip_prefix(DIFFICULTY_LABEL_PREFIX).unwrap_or(lower.as_str());
        match level {
            "low" => Ok(Difficulty::Low),
            "medium" => Ok(Difficulty::Medium),
            "high" => Ok(Difficulty::High),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

/// Custom numeric project fields. `None` means the field was never set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub size: Option<f64>,
    pub estimated: Option<f64>,
    pub actual: Option<f64>,
}

/// Weak back-reference to the immediate parent (identity only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentRef {
    pub id: String,
}

impl ParentRef {
    pub fn new(id: impl Into<String>) -> Self {
        ParentRef { id: id.into() }
    }
}

/// The primary entity representing a tracked work item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkItem {
    /// Issue URL, used as the primary key.
    pub url: String,
    pub title: String,
    /// Login of the user who opened the item.
    pub author: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<String>,
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<FixedOffset>>,
    pub state: IssueState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<CloseReason>,
    /// Label names as reported (case preserved).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    pub metrics: Metrics,
    /// Absent iff this item is a root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,
    /// Materialized descendants; empty until a family is built.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WorkItem>,
}

impl WorkItem {
    /// Creates an open, unlabeled root item with no metrics.
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        WorkItem {
            url: url.into(),
            title: title.into(),
            author: author.into(),
            assignees: Vec::new(),
            created_at,
            closed_at: None,
            state: IssueState::Open,
            close_reason: None,
            labels: Vec::new(),
            metrics: Metrics::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Marks the item closed at `closed_at` for `reason` (builder pattern).
    pub fn closed(mut self, closed_at: DateTime<FixedOffset>, reason: CloseReason) -> Self {
        self.state = IssueState::Closed;
        self.closed_at = Some(closed_at);
        self.close_reason = Some(reason);
        self
    }

    /// Sets the labels (builder pattern).
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the assignees (builder pattern).
    pub fn with_assignees<I, S>(mut self, assignees: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignees = assignees.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the custom numeric fields (builder pattern).
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Sets the parent reference (builder pattern).
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Issue number taken from the last path segment of the URL.
    pub fn number(&self) -> Option<u64> {
        self.url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }

    /// Issue number for display, `?` when the URL has none.
    pub fn display_number(&self) -> String {
        self.number().map_or_else(|| "?".to_string(), |n| n.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Closed with reason COMPLETED.
    pub fn is_completed(&self) -> bool {
        self.state == IssueState::Closed && self.close_reason == Some(CloseReason::Completed)
    }

    /// Epic-class: carries `pbi` or `dev-pbi`.
    pub fn is_epic(&self) -> bool {
        label::has_any_label(self, EPIC_LABELS)
    }

    /// Story-class: carries `sbi` or `dev-sbi`.
    pub fn is_story(&self) -> bool {
        label::has_any_label(self, STORY_LABELS)
    }

    /// First difficulty label found, if any.
    pub fn difficulty(&self) -> Option<Difficulty> {
        Difficulty::ALL
            .into_iter()
            .find(|d| label::has_any_label(self, &[d.label().as_str()]))
    }

    /// Assignees, or the author when nobody is assigned.
    pub fn responsible(&self) -> Vec<String> {
        if self.assignees.is_empty() {
            vec![self.author.clone()]
        } else {
            self.assignees.clone()
        }
    }
}

/// Owner, repository and number parsed from an issue URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl IssueRef {
    /// Parses `https://<host>/<owner>/<repo>/issues/<number>`.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || Error::InvalidIssueUrl(url.to_string());
        let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
        if parts.len() < 7 || parts[3].is_empty() || parts[4].is_empty() || parts[5] != "issues" {
            return Err(invalid());
        }
        let number = parts[6].parse().map_err(|_| invalid())?;
        Ok(IssueRef {
            owner: parts[3].to_string(),
            repo: parts[4].to_string(),
            number,
        })
    }
}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
