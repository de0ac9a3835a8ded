// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup.
//!
//! Filter directives come from `FAMAUDIT_LOG`, then `RUST_LOG`, defaulting to
//! `warn`. Logs go to stderr unless a log file is given.

use std::fs;
use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::env;
use crate::error::{Error, Result};

const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from the environment, falling back to `warn` when the
/// directives are missing or invalid.
pub fn env_filter() -> EnvFilter {
    env::log_filter()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Call once, before any work starts.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = env_filter();
    let installed = match log_file {
        Some(path) => {
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| Error::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .with_ansi(false)
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| Error::Config(format!("failed to initialise logging: {}", e)))
}
