//! CLI argument definitions and `LaunchProfile` construction.
use anyhow::Result;
use clap::Parser;

use super::{resolve_settings_path, LaunchProfile};

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Launch a dedicated server with the arguments of the selected mode",
    long_about = "Launch a dedicated server with the arguments of the selected mode.\n\nThe start command, update command, default arguments and mode map are read from settings.json in the working directory (override with SRV_SETTINGS_PATH). A default file is created on first run."
)]
pub struct LaunchArgs {
    /// Desired server mode; replaces the mode saved in the settings file.
    pub mode: Option<String>,
    /// Exit immediately after applying settings changes.
    #[arg(short = 'e', long = "exit", default_value_t = false)]
    pub exit: bool,
}

impl LaunchArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn into_profile(self) -> Result<LaunchProfile> {
        let settings_path = resolve_settings_path()?;

        Ok(LaunchProfile {
            settings_path,
            mode_override: self.mode.filter(|mode| !mode.is_empty()),
            exit_only: self.exit,
        })
    }
}
