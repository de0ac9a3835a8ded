// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn missing_setting_has_hint() {
    let err = Error::MissingSetting {
        setting: "org",
        env: "ORG",
        flag: "org",
    };
    let msg = err.to_string();
    assert!(msg.starts_with("org is required"));
    assert!(msg.contains("set ORG, pass --org"));
}

#[test]
fn core_errors_display_transparently() {
    let err: Error = fa_core::Error::InvalidMaxDepth(0).into();
    assert!(err.to_string().starts_with("invalid max depth: 0"));
}

#[test]
fn read_config_names_path() {
    let err = Error::ReadConfig {
        path: PathBuf::from("/etc/famaudit.toml"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
    };
    assert!(err.to_string().contains("/etc/famaudit.toml"));
}
