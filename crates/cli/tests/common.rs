// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn famaudit() -> Command {
    cargo_bin_cmd!("famaudit")
}

/// A command isolated from the caller's environment and config files.
///
/// The working directory, `HOME` and `XDG_CONFIG_HOME` all point at `temp`.
pub fn isolated(temp: &TempDir) -> Command {
    let mut cmd = famaudit();
    cmd.env_clear()
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .current_dir(temp.path());
    cmd
}

/// Writes `famaudit.toml` into `temp`.
pub fn write_config(temp: &TempDir, content: &str) {
    std::fs::write(temp.path().join("famaudit.toml"), content).unwrap();
}

/// Flags that satisfy every required audit setting except the token.
pub const AUDIT_REQUIRED: [&str; 7] = ["audit", "--org", "acme", "--project", "3", "--repo", "app"];
