// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fa-core operations.

use thiserror::Error;

/// All possible errors that can occur in fa-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid max depth: {0}\n  hint: max depth must be a positive number of levels")]
    InvalidMaxDepth(i64),

    #[error("invalid issue state: '{0}'\n  hint: valid states are: OPEN, CLOSED")]
    InvalidState(String),

    #[error("invalid difficulty: '{0}'\n  hint: valid difficulties are: low, medium, high")]
    InvalidDifficulty(String),

    #[error("invalid timestamp for {field}: '{value}'")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid date: '{0}'\n  hint: dates use the YYYY-MM-DD format")]
    InvalidDate(String),

    #[error("invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid weekday: {0}\n  hint: use 0-7 (0 and 7 are Sunday, 1 is Monday)")]
    InvalidWeekday(i64),

    #[error("invalid UTC offset: {0} hours")]
    InvalidOffset(i32),

    #[error("invalid issue URL: '{0}'\n  hint: expected https://github.com/<owner>/<repo>/issues/<number>")]
    InvalidIssueUrl(String),

    #[error("provider error: {0}")]
    Provider(String),
}

/// A specialized Result type for fa-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
