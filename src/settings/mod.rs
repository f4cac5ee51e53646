//! Load, initialize, and persist launcher settings.
use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info};

use crate::lib::{errors::SettingsError, fs as settings_fs};

pub mod defaults;
pub mod telemetry;

pub use defaults::{
    DEFAULT_DEFAULT_ARGS, DEFAULT_MODE, DEFAULT_START, DEFAULT_UNSPECIFIED_ARGS,
    SETTINGS_FILE_NAME,
};

/// Persisted launcher configuration.
///
/// Keys use the camelCase names of the current file format. The names written
/// by older launcher revisions (`exe`, `default`, `unspecified`, `mode map`)
/// are accepted on read and replaced on the next write. When a file carries
/// both spellings the current key wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSettings", rename_all = "camelCase")]
pub struct Settings {
    /// Server program followed by any fixed words.
    pub start: String,
    /// Update command; empty skips the update step.
    pub update: String,
    /// Arguments appended to every launch.
    pub default_args: String,
    /// Arguments used when `mode` has no `mode_map` entry.
    pub unspecified_args: String,
    pub mode: String,
    pub mode_map: BTreeMap<String, String>,
    /// Keys this launcher does not know about, written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// On-disk shape: every key optional, `null` treated as missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSettings {
    start: Option<String>,
    #[serde(rename = "exe")]
    legacy_start: Option<String>,
    update: Option<String>,
    default_args: Option<String>,
    #[serde(rename = "default")]
    legacy_default_args: Option<String>,
    unspecified_args: Option<String>,
    #[serde(rename = "unspecified")]
    legacy_unspecified_args: Option<String>,
    mode: Option<String>,
    mode_map: Option<BTreeMap<String, String>>,
    #[serde(rename = "mode map")]
    legacy_mode_map: Option<BTreeMap<String, String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawSettings> for Settings {
    fn from(raw: RawSettings) -> Self {
        Self {
            start: raw.start.or(raw.legacy_start).unwrap_or_default(),
            update: raw.update.unwrap_or_default(),
            default_args: raw
                .default_args
                .or(raw.legacy_default_args)
                .unwrap_or_default(),
            unspecified_args: raw
                .unspecified_args
                .or(raw.legacy_unspecified_args)
                .unwrap_or_default(),
            mode: raw.mode.unwrap_or_default(),
            mode_map: raw.mode_map.or(raw.legacy_mode_map).unwrap_or_default(),
            extra: raw.extra,
        }
    }
}

/// Whether `load_or_init` found a file or had to write the defaults first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSource {
    Existing,
    Created,
}

impl Settings {
    /// Launch arguments for the active mode, falling back to `unspecified_args`.
    pub fn mode_args(&self) -> &str {
        self.mode_map
            .get(&self.mode)
            .map(String::as_str)
            .unwrap_or(&self.unspecified_args)
    }

    /// True when `start` holds something other than whitespace.
    pub fn has_start_command(&self) -> bool {
        !self.start.trim().is_empty()
    }

    /// True when `update` holds something other than whitespace.
    pub fn has_update_command(&self) -> bool {
        !self.update.trim().is_empty()
    }

    /// Read settings from `path`, writing the defaults first when the file is absent.
    ///
    /// The defaults are read back through the same reader so both paths agree
    /// on the format.
    pub fn load_or_init(path: &Path) -> Result<(Self, SettingsSource), SettingsError> {
        let source = if path.exists() {
            SettingsSource::Existing
        } else {
            telemetry::log_initializing(path);
            Self::default_instance().save(path)?;
            SettingsSource::Created
        };

        let settings = Self::load_from_path(path)?;
        telemetry::log_loaded(path, &settings, source);
        Ok((settings, source))
    }

    /// Load settings from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        info!(
            target: "srv_launcher::settings",
            path = %path.display(),
            "Starting settings load"
        );

        settings_fs::read_json(path).map_err(|err| {
            error!(
                target: "srv_launcher::settings",
                path = %path.display(),
                reason = %err,
                "Failed to load settings file"
            );
            err
        })
    }

    /// Overwrite `path` with these settings.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        settings_fs::write_json(path, self).map_err(|err| {
            error!(
                target: "srv_launcher::settings",
                path = %path.display(),
                reason = %err,
                "Failed to write settings file"
            );
            err
        })
    }
}

/// Select `mode` and persist the full settings when a non-empty mode is given.
///
/// Returns the (possibly updated) settings and whether a write happened.
pub fn apply_mode_override(
    mut settings: Settings,
    mode: Option<&str>,
    path: &Path,
) -> Result<(Settings, bool), SettingsError> {
    let Some(mode) = mode.filter(|mode| !mode.is_empty()) else {
        return Ok((settings, false));
    };

    let previous = std::mem::replace(&mut settings.mode, mode.to_string());
    settings.save(path)?;
    telemetry::log_mode_changed(path, &previous, &settings.mode);
    Ok((settings, true))
}
