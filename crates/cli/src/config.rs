// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Layered configuration.
//!
//! Settings are merged from, lowest to highest precedence:
//! - built-in defaults
//! - a TOML file (`--config`, else `./famaudit.toml`, else
//!   `<config dir>/famaudit/config.toml`)
//! - environment variables (`ORG`, `PROJECT`, `REPOS`, ...)
//! - command-line flags
//!
//! The token and the token file are one setting: a layer that sets either
//! replaces both from lower layers. Within a layer the token wins.
//!
//! The merged [`Settings`] are validated into an [`AuditConfig`] or
//! [`TreeConfig`] before any request is made.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use fa_core::{ClockSource, DateRange, FieldNames, MaxDepth, ParseContext, ReportZone, RootFilter};
use fa_github::DEFAULT_ENDPOINT;

use crate::env;
use crate::error::{Error, Result};
use crate::report::ReportPeriods;

/// Config file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "famaudit.toml";
const CONFIG_DIR_NAME: &str = "famaudit";
const USER_CONFIG_FILE_NAME: &str = "config.toml";

/// Overrides for the custom field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOverrides {
    pub size: Option<String>,
    pub estimated: Option<String>,
    pub actual: Option<String>,
}

/// One configuration layer. Every field is optional so layers can be
/// stacked with [`Settings::overlay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub org: Option<String>,
    pub project: Option<u64>,
    pub repositories: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub weekday: Option<i64>,
    pub check_start_date: Option<String>,
    pub max_depth: Option<i64>,
    pub utc_offset_hours: Option<i32>,
    pub endpoint: Option<String>,
    pub token: Option<String>,
    pub token_file: Option<PathBuf>,
    pub fields: FieldOverrides,
}

/// Validated settings for `famaudit audit`.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub org: String,
    pub project: u64,
    pub filter: RootFilter,
    pub max_depth: MaxDepth,
    pub ctx: ParseContext,
    pub periods: ReportPeriods,
    pub endpoint: String,
    pub token: String,
}

/// Validated settings for `famaudit tree`.
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// Project whose field values are preferred; 0 when unset.
    pub project: u64,
    pub max_depth: MaxDepth,
    pub ctx: ParseContext,
    pub endpoint: String,
    pub token: String,
}

impl Settings {
    /// Parses a TOML file.
    pub fn load(path: &Path) -> Result<Settings> {
        let content = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ParseConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the explicit file if given, otherwise the first default location
    /// that exists. No file at all yields empty settings.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
        if let Some(path) = explicit {
            return Settings::load(path);
        }
        let candidates = [
            Some(cwd.join(CONFIG_FILE_NAME)),
            dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join(USER_CONFIG_FILE_NAME)),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!("Loading config from {}", path.display());
                return Settings::load(&path);
            }
        }
        Ok(Settings::default())
    }

    /// Reads the environment layer.
    pub fn from_env() -> Result<Settings> {
        Ok(Settings {
            org: env::org(),
            project: parse_opt("PROJECT", env::project())?,
            repositories: env::repos().map(|r| split_list(&r)),
            start_date: env::start_date(),
            end_date: env::end_date(),
            weekday: parse_opt("WEEKDAY", env::weekday())?,
            check_start_date: env::check_start_date(),
            max_depth: parse_opt("FAMAUDIT_MAX_DEPTH", env::max_depth())?,
            token: env::github_token(),
            token_file: env::github_token_file(),
            ..Settings::default()
        })
    }

    /// Merges `upper` over `self`; values set in `upper` win.
    pub fn overlay(self, upper: Settings) -> Settings {
        let (token, token_file) = if upper.token.is_some() || upper.token_file.is_some() {
            (upper.token, upper.token_file)
        } else {
            (self.token, self.token_file)
        };
        Settings {
            org: upper.org.or(self.org),
            project: upper.project.or(self.project),
            repositories: upper.repositories.or(self.repositories),
            start_date: upper.start_date.or(self.start_date),
            end_date: upper.end_date.or(self.end_date),
            weekday: upper.weekday.or(self.weekday),
            check_start_date: upper.check_start_date.or(self.check_start_date),
            max_depth: upper.max_depth.or(self.max_depth),
            utc_offset_hours: upper.utc_offset_hours.or(self.utc_offset_hours),
            endpoint: upper.endpoint.or(self.endpoint),
            token,
            token_file,
            fields: FieldOverrides {
                size: upper.fields.size.or(self.fields.size),
                estimated: upper.fields.estimated.or(self.fields.estimated),
                actual: upper.fields.actual.or(self.fields.actual),
            },
        }
    }

    pub fn max_depth(&self) -> Result<MaxDepth> {
        match self.max_depth {
            Some(depth) => Ok(MaxDepth::new(depth)?),
            None => Ok(MaxDepth::default()),
        }
    }

    pub fn zone(&self) -> Result<ReportZone> {
        match self.utc_offset_hours {
            Some(hours) => Ok(ReportZone::from_hours(hours)?),
            None => Ok(ReportZone::default()),
        }
    }

    pub fn field_names(&self) -> FieldNames {
        let defaults = FieldNames::default();
        FieldNames {
            size: self.fields.size.clone().unwrap_or(defaults.size),
            estimated: self.fields.estimated.clone().unwrap_or(defaults.estimated),
            actual: self.fields.actual.clone().unwrap_or(defaults.actual),
        }
    }

    /// The closed-date window for the main audit, from the start and end
    /// dates.
    pub fn closed_range(&self, zone: &ReportZone) -> Result<Option<DateRange>> {
        match (&self.start_date, &self.end_date) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) => {
                let first = zone.parse_date(start)?;
                let last = zone.parse_date(end)?;
                Ok(Some(DateRange::from_dates(zone, first, last)?))
            }
            _ => Err(Error::Config(
                "START_DATE and END_DATE must be set together".to_string(),
            )),
        }
    }

    /// The weekly report window, when a weekday is set.
    pub fn weekly_range(&self, zone: &ReportZone, clock: &impl ClockSource) -> Result<Option<DateRange>> {
        self.weekday
            .map(|weekday| DateRange::weekly(zone, weekday, clock))
            .transpose()
            .map_err(Error::from)
    }

    /// Start of the missing-time listing's creation cut-off day.
    pub fn created_since(&self, zone: &ReportZone) -> Result<Option<DateTime<FixedOffset>>> {
        match &self.check_start_date {
            Some(raw) => Ok(Some(zone.start_of_day(zone.parse_date(raw)?))),
            None => Ok(None),
        }
    }

    /// The API token, read from `token_file` when no token is set directly.
    pub fn token(&self) -> Result<String> {
        if let Some(token) = self.token.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Ok(token.to_string());
        }
        if let Some(path) = &self.token_file {
            let token = fs::read_to_string(path).map_err(|source| Error::ReadConfig {
                path: path.clone(),
                source,
            })?;
            let token = token.trim();
            if token.is_empty() {
                return Err(Error::Config(format!("token file {} is empty", path.display())));
            }
            return Ok(token.to_string());
        }
        Err(Error::MissingSetting {
            setting: "token",
            env: "GITHUB_TOKEN",
            flag: "token-file",
        })
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    fn parse_context(&self) -> Result<ParseContext> {
        Ok(ParseContext::new(self.zone()?, self.field_names()))
    }

    /// Validates everything an audit run needs. Fails before any request.
    pub fn resolve_audit(&self, clock: &impl ClockSource) -> Result<AuditConfig> {
        let max_depth = self.max_depth()?;
        let ctx = self.parse_context()?;
        let org = self.org.clone().ok_or(Error::MissingSetting {
            setting: "org",
            env: "ORG",
            flag: "org",
        })?;
        let project = self.project.ok_or(Error::MissingSetting {
            setting: "project",
            env: "PROJECT",
            flag: "project",
        })?;
        let repositories = self
            .repositories
            .clone()
            .filter(|r| !r.is_empty())
            .ok_or(Error::MissingSetting {
                setting: "repositories",
                env: "REPOS",
                flag: "repo",
            })?;
        let mut filter = RootFilter::new(repositories);
        if let Some(range) = self.closed_range(&ctx.zone)? {
            filter = filter.closed_within(range);
        }
        let periods = ReportPeriods {
            weekly: self.weekly_range(&ctx.zone, clock)?,
            created_since: self.created_since(&ctx.zone)?,
        };
        let token = self.token()?;

        Ok(AuditConfig {
            org,
            project,
            filter,
            max_depth,
            ctx,
            periods,
            endpoint: self.endpoint(),
            token,
        })
    }

    /// Validates what `famaudit tree` needs.
    pub fn resolve_tree(&self) -> Result<TreeConfig> {
        let max_depth = self.max_depth()?;
        let ctx = self.parse_context()?;
        let token = self.token()?;
        Ok(TreeConfig {
            project: self.project.unwrap_or(0),
            max_depth,
            ctx,
            endpoint: self.endpoint(),
            token,
        })
    }
}

/// Splits a comma-separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_opt<T: std::str::FromStr>(setting: &'static str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| Error::InvalidSetting { setting, value })
    })
    .transpose()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
