#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_srv-launcher");
pub const SETTINGS_FILE: &str = "settings.json";

/// Launcher command running inside `dir`, isolated from the caller's environment.
pub fn launcher(dir: &Path) -> Command {
    let mut command = Command::new(BINARY_PATH);
    command
        .current_dir(dir)
        .env_remove("SRV_SETTINGS_PATH")
        .env("RUST_LOG", "off")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}

pub fn run_launcher(dir: &Path, args: &[&str]) -> Result<Output> {
    launcher(dir)
        .args(args)
        .output()
        .context("failed to run launcher binary")
}

pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

pub fn workspace() -> TempDir {
    tempfile::tempdir().expect("can create temporary directory")
}

pub fn write_settings(dir: &Path, value: &Value) -> Result<()> {
    let serialized = serde_json::to_string_pretty(value).context("failed to serialize settings")?;
    fs::write(dir.join(SETTINGS_FILE), serialized).context("failed to write settings")
}

pub fn read_settings(dir: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(dir.join(SETTINGS_FILE)).context("failed to read settings")?;
    serde_json::from_str(&content).context("settings should be valid JSON")
}

/// Write a `/bin/sh` script; launch it as `sh <name>` so it needs no exec bit.
pub fn write_script(dir: &Path, name: &str, body: &str) -> Result<()> {
    fs::write(dir.join(name), format!("#!/bin/sh\n{body}\n"))
        .with_context(|| format!("failed to write script {name}"))
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
