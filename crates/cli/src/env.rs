// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by the CLI are defined here
//! with typed accessor functions. The variable name constants are generated
//! by `build.rs` and live in the [`vars`] submodule. Blank values count as
//! unset.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

fn read(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Organization login from `ORG`.
pub fn org() -> Option<String> {
    read(vars::ORG)
}

/// Project number from `PROJECT`, unparsed.
pub fn project() -> Option<String> {
    read(vars::PROJECT)
}

/// Comma-separated repository names from `REPOS`.
pub fn repos() -> Option<String> {
    read(vars::REPOS)
}

pub fn start_date() -> Option<String> {
    read(vars::START_DATE)
}

pub fn end_date() -> Option<String> {
    read(vars::END_DATE)
}

/// Weekday (0-7) from `WEEKDAY`, unparsed.
pub fn weekday() -> Option<String> {
    read(vars::WEEKDAY)
}

/// Creation date cut-off for the missing-time listing, from `CHECK_START_DATE`.
pub fn check_start_date() -> Option<String> {
    read(vars::CHECK_START_DATE)
}

pub fn github_token() -> Option<String> {
    read(vars::GITHUB_TOKEN)
}

/// Path of a file holding the token, from `GITHUB_TOKEN_FILE`.
pub fn github_token_file() -> Option<PathBuf> {
    read(vars::GITHUB_TOKEN_FILE).map(PathBuf::from)
}

pub fn max_depth() -> Option<String> {
    read(vars::FAMAUDIT_MAX_DEPTH)
}

/// Log filter directives, `FAMAUDIT_LOG` first, then `RUST_LOG`.
pub fn log_filter() -> Option<String> {
    read(vars::FAMAUDIT_LOG).or_else(|| read(vars::RUST_LOG))
}

/// Returns `true` if `FAMAUDIT_TIMINGS` is set (any value).
pub fn timings() -> bool {
    std::env::var(vars::FAMAUDIT_TIMINGS).is_ok()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
