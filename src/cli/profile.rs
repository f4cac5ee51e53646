//! LaunchProfile and settings path resolution.
use std::{env, ffi::OsString, path::PathBuf};

use anyhow::{bail, Result};

use crate::settings::SETTINGS_FILE_NAME;

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "SRV_SETTINGS_PATH";

/// Resolved operator intent for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchProfile {
    pub settings_path: PathBuf,
    /// Non-empty mode name to select and persist.
    pub mode_override: Option<String>,
    /// Stop after persisting settings changes.
    pub exit_only: bool,
}

/// Resolve the settings path in the order: env var → `settings.json`.
///
/// Relative paths stay relative to the working directory.
pub fn resolve_settings_path() -> Result<PathBuf> {
    resolve_settings_path_from(env::var_os(SETTINGS_PATH_ENV))
}

fn resolve_settings_path_from(env_value: Option<OsString>) -> Result<PathBuf> {
    match env_value {
        Some(value) if !value.is_empty() => {
            let path = PathBuf::from(value);
            if path.is_dir() {
                bail!(
                    "{SETTINGS_PATH_ENV} points to a directory: {}",
                    path.display()
                );
            }
            Ok(path)
        }
        _ => Ok(PathBuf::from(SETTINGS_FILE_NAME)),
    }
}
