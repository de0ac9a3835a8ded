// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{split_list, Settings};

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

const QUICKSTART_HELP: &str = "\
Get started:
  export GITHUB_TOKEN=...            Token with read:project and repo scopes
  famaudit audit --org acme --project 3 --repo app
  famaudit audit --weekday 1          Add a report for the last weekly window
  famaudit tree https://github.com/acme/app/issues/12";

#[derive(Parser)]
#[command(name = "famaudit")]
#[command(version)]
#[command(about = "Audit completed GitHub issue families for missing size and time data")]
#[command(after_help = QUICKSTART_HELP)]
pub struct Cli {
    /// Config file (default: ./famaudit.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build, validate and summarize every completed root in a project
    #[command(after_help = "Examples:\n  \
        famaudit audit --org acme --project 3 --repo app --repo api\n  \
        famaudit audit --start-date 2025-04-01 --end-date 2025-04-30\n  \
        famaudit audit --weekday 1 --format markdown\n  \
        famaudit audit --check-start-date 2025-04-01\n  \
        famaudit audit --format json --show-pruned")]
    Audit(AuditArgs),

    /// Build and print the family of a single issue
    #[command(after_help = "Examples:\n  \
        famaudit tree https://github.com/acme/app/issues/12\n  \
        famaudit tree https://github.com/acme/app/issues/12 --max-depth 2 --format json")]
    Tree(TreeArgs),
}

/// Flags shared by every command that talks to GitHub.
#[derive(Args, Debug, Default, Clone)]
pub struct CommonArgs {
    /// Maximum depth below a root whose children are fetched (default: 5)
    #[arg(long, allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Hours east of UTC used for dates and output (default: 9)
    #[arg(long, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// File containing the GitHub token
    #[arg(long)]
    pub token_file: Option<PathBuf>,

    /// GraphQL endpoint
    #[arg(long, hide = true)]
    pub endpoint: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct AuditArgs {
    /// Organization login
    #[arg(long)]
    pub org: Option<String>,

    /// Project (v2) number
    #[arg(long)]
    pub project: Option<u64>,

    /// Repository to include (comma-separated or repeated)
    #[arg(long = "repo", short)]
    pub repos: Vec<String>,

    /// First closing date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Last closing date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Also report roots closed in the weekly window starting on this
    /// weekday (0-7, 0 and 7 are Sunday)
    #[arg(long)]
    pub weekday: Option<i64>,

    /// Also list roots created on or after this date that lack time data
    /// (YYYY-MM-DD)
    #[arg(long)]
    pub check_start_date: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List children dropped because they were not completed
    #[arg(long)]
    pub show_pruned: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TreeArgs {
    /// Issue URL (https://github.com/<owner>/<repo>/issues/<number>)
    pub url: String,

    /// Project whose field values are used
    #[arg(long)]
    pub project: Option<u64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CommonArgs {
    /// The command-line layer of the settings.
    pub fn settings(&self) -> Settings {
        Settings {
            max_depth: self.max_depth,
            utc_offset_hours: self.utc_offset,
            token_file: self.token_file.clone(),
            endpoint: self.endpoint.clone(),
            ..Settings::default()
        }
    }
}

impl AuditArgs {
    pub fn settings(&self) -> Settings {
        let repos: Vec<String> = self.repos.iter().flat_map(|r| split_list(r)).collect();
        Settings {
            org: self.org.clone(),
            project: self.project,
            repositories: (!repos.is_empty()).then_some(repos),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            weekday: self.weekday,
            check_start_date: self.check_start_date.clone(),
            ..self.common.settings()
        }
    }
}

impl TreeArgs {
    pub fn settings(&self) -> Settings {
        Settings {
            project: self.project,
            ..self.common.settings()
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
