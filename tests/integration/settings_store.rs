use std::fs;

use anyhow::Result;
use serde_json::{json, Value};

use crate::common::{
    fixture, read_settings, run_launcher, stdout_of, workspace, write_settings, SETTINGS_FILE,
};

fn default_settings() -> Result<Value> {
    let content = fs::read_to_string(fixture("tests/fixtures/settings_defaults.json"))?;
    Ok(serde_json::from_str(&content)?)
}

#[test]
fn first_run_writes_defaults_and_second_run_reads_them_back() -> Result<()> {
    let dir = workspace();

    let first = run_launcher(dir.path(), &[])?;
    let written = fs::read(dir.path().join(SETTINGS_FILE))?;
    let second = run_launcher(dir.path(), &[])?;

    assert!(
        stdout_of(&first).contains("Creating default settings.json file..."),
        "stdout: {}",
        stdout_of(&first)
    );
    assert_eq!(read_settings(dir.path())?, default_settings()?);
    assert_eq!(
        fs::read(dir.path().join(SETTINGS_FILE))?,
        written,
        "second run must not rewrite the file"
    );
    assert!(!stdout_of(&second).contains("Creating default"));
    // The default `./srcds_run` does not exist in an empty directory.
    assert_eq!(first.status.code(), Some(1));
    assert_eq!(second.status.code(), Some(1));
    Ok(())
}

#[test]
fn defaults_are_written_with_four_space_indentation() -> Result<()> {
    let dir = workspace();

    run_launcher(dir.path(), &["--exit"])?;

    let content = fs::read_to_string(dir.path().join(SETTINGS_FILE))?;
    assert!(
        content.starts_with("{\n    \"start\": \"./srcds_run\",\n"),
        "content: {content}"
    );
    assert!(
        content.contains("\n        \"sandbox\": "),
        "content: {content}"
    );
    Ok(())
}

#[test]
fn mode_argument_is_persisted_with_and_without_exit_flag() -> Result<()> {
    let dir = workspace();
    write_settings(dir.path(), &json!({ "start": "", "mode": "sandbox" }))?;

    let with_exit = run_launcher(dir.path(), &["prophunt", "-e"])?;
    assert_eq!(with_exit.status.code(), Some(0));
    assert_eq!(read_settings(dir.path())?["mode"], json!("prophunt"));
    assert!(stdout_of(&with_exit).contains("Mode changed to prophunt..."));
    assert!(stdout_of(&with_exit).contains("Exiting..."));

    let without_exit = run_launcher(dir.path(), &["ttt"])?;
    assert_eq!(read_settings(dir.path())?["mode"], json!("ttt"));
    assert_eq!(
        without_exit.status.code(),
        Some(2),
        "empty start still stops the launch"
    );
    Ok(())
}

#[test]
fn mode_override_keeps_unknown_keys() -> Result<()> {
    let dir = workspace();
    write_settings(
        dir.path(),
        &json!({
            "start": "sh ./srcds_run",
            "mode": "sandbox",
            "modeMap": {},
            "hostname": "Friday Night Prop Hunt"
        }),
    )?;

    let output = run_launcher(dir.path(), &["prophunt", "--exit"])?;

    assert_eq!(output.status.code(), Some(0));
    let settings = read_settings(dir.path())?;
    assert_eq!(settings["hostname"], json!("Friday Night Prop Hunt"));
    assert_eq!(settings["mode"], json!("prophunt"));
    Ok(())
}

#[test]
fn legacy_settings_are_rewritten_with_current_keys() -> Result<()> {
    let dir = workspace();
    fs::copy(
        fixture("tests/fixtures/settings_legacy.json"),
        dir.path().join(SETTINGS_FILE),
    )?;

    let output = run_launcher(dir.path(), &["prophunt", "-e"])?;

    assert_eq!(output.status.code(), Some(0));
    let mut expected = default_settings()?;
    expected["mode"] = json!("prophunt");
    assert_eq!(read_settings(dir.path())?, expected);
    Ok(())
}

#[test]
fn malformed_settings_are_fatal() -> Result<()> {
    let dir = workspace();
    fs::write(dir.path().join(SETTINGS_FILE), "{ \"start\": ")?;

    let output = run_launcher(dir.path(), &["prophunt"])?;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to parse settings file"),
        "stderr: {stderr}"
    );
    assert_eq!(
        stderr.matches("EOF while parsing").count(),
        1,
        "parse error should be reported once: {stderr}"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join(SETTINGS_FILE))?,
        "{ \"start\": ",
        "malformed file must be left alone"
    );
    Ok(())
}

#[test]
fn settings_path_can_be_overridden_by_environment() -> Result<()> {
    let dir = workspace();
    let custom = dir.path().join("profiles/gmod.json");

    let output = crate::common::launcher(dir.path())
        .env("SRV_SETTINGS_PATH", &custom)
        .args(["prophunt", "-e"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(custom.exists(), "settings should be created at the override");
    assert!(!dir.path().join(SETTINGS_FILE).exists());
    let settings: Value = serde_json::from_str(&fs::read_to_string(&custom)?)?;
    assert_eq!(settings["mode"], json!("prophunt"));
    Ok(())
}
