// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    let vars = [
        ("ORG", "ORG"),
        ("PROJECT", "PROJECT"),
        ("REPOS", "REPOS"),
        ("START_DATE", "START_DATE"),
        ("END_DATE", "END_DATE"),
        ("WEEKDAY", "WEEKDAY"),
        ("CHECK_START_DATE", "CHECK_START_DATE"),
        ("GITHUB_TOKEN", "GITHUB_TOKEN"),
        ("GITHUB_TOKEN_FILE", "GITHUB_TOKEN_FILE"),
        ("FAMAUDIT_MAX_DEPTH", "FAMAUDIT_MAX_DEPTH"),
        ("FAMAUDIT_LOG", "FAMAUDIT_LOG"),
        ("FAMAUDIT_TIMINGS", "FAMAUDIT_TIMINGS"),
        ("RUST_LOG", "RUST_LOG"),
    ];

    for (const_name, env_name) in &vars {
        writeln!(f, "pub const {const_name}: &str = \"{env_name}\";")?;
    }

    Ok(())
}
