// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! famaudit - audit completed GitHub issue families.
//!
//! This crate provides the `famaudit` CLI: it loads layered settings,
//! fetches completed root issues from a GitHub project, rebuilds each
//! root's family of sub-issues with [`fa_core::FamilyBuilder`], and renders
//! validation and time totals as text, Markdown or JSON.
//!
//! ```rust,ignore
//! use clap::Parser;
//!
//! let cli = famaudit_cli::Cli::parse();
//! famaudit_cli::run(cli)?;
//! ```

mod cli;
mod commands;
mod display;
mod report;
pub mod timings;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

pub use cli::{AuditArgs, Cli, Command, CommonArgs, OutputFormat, TreeArgs};
pub use config::{AuditConfig, Settings, TreeConfig};
pub use error::{Error, Result};
pub use report::{AuditReport, ReportPeriods};

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_file.as_deref())?;
    let config = cli.config.as_deref();
    match &cli.command {
        Command::Audit(args) => commands::audit::run(config, args),
        Command::Tree(args) => commands::tree::run(config, args),
    }
}
