use std::path::Path;

use tracing::{debug, info};

use super::{Settings, SettingsSource};

pub fn log_initializing(path: &Path) {
    info!(
        target: "srv_launcher::settings",
        path = %path.display(),
        "Settings file not found; writing defaults"
    );
}

pub fn log_loaded(path: &Path, settings: &Settings, source: SettingsSource) {
    info!(
        target: "srv_launcher::settings",
        path = %path.display(),
        created = source == SettingsSource::Created,
        mode = %settings.mode,
        known_modes = settings.mode_map.len(),
        has_update = settings.has_update_command(),
        unknown_keys = settings.extra.len(),
        "Settings file loaded successfully"
    );
}

pub fn log_mode_changed(path: &Path, previous: &str, mode: &str) {
    debug!(
        target: "srv_launcher::settings",
        path = %path.display(),
        previous,
        mode,
        "Persisted mode override"
    );
}
