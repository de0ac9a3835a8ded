// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod audit;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod tree;

use std::path::Path;

use crate::config::Settings;
use crate::error::Result;

/// Merges the config file, the environment and the command-line layer, in
/// increasing precedence.
pub fn load_settings(config_path: Option<&Path>, flags: Settings) -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    let file = crate::time_phase!("config::load", { Settings::discover(config_path, &cwd)? });
    Ok(file.overlay(Settings::from_env()?).overlay(flags))
}
