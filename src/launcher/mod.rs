//! The launch sequence: settings, mode override, update step, server.
use std::{future::Future, path::Path};

use tracing::info;

use crate::{
    cli::LaunchProfile,
    lib::errors::{LaunchError, SettingsError},
    settings::{apply_mode_override, Settings, SettingsSource},
};

mod executor;
mod exit;
pub mod outcome;
pub mod plan;

pub use executor::{operator_interrupt, run_child, SERVER_STAGE, UPDATE_STAGE};
pub use exit::LauncherExit;
pub use outcome::{ChildOutcome, RunOutcome};
pub use plan::LaunchCommand;

/// Run one launcher invocation to completion.
///
/// `interrupt` is called once per child process and must return a future that
/// resolves when the operator asks to stop. Settings errors are fatal and
/// returned; every other ending is a `RunOutcome`.
pub async fn run<I, F>(
    profile: &LaunchProfile,
    mut interrupt: I,
) -> Result<RunOutcome, SettingsError>
where
    I: FnMut() -> F,
    F: Future<Output = ()>,
{
    let settings_path = profile.settings_path.as_path();
    if !settings_path.exists() {
        println!("Creating default {} file...", settings_path.display());
    }
    let (settings, source) = Settings::load_or_init(settings_path)?;
    if source == SettingsSource::Created {
        info!(
            target: "srv_launcher::launcher",
            path = %settings_path.display(),
            "Initialized settings with defaults"
        );
    }

    let (settings, changed) =
        apply_mode_override(settings, profile.mode_override.as_deref(), settings_path)?;
    if changed {
        println!("Mode changed to {}...", settings.mode);
    }

    if profile.exit_only {
        println!("Exiting...");
        return Ok(RunOutcome::ExitRequested);
    }

    if let Err(err) = ensure_start_command(&settings, settings_path) {
        println!("{err}");
        return Ok(RunOutcome::Rejected(err));
    }

    if let Some(outcome) = run_update(&settings, interrupt()).await {
        return Ok(outcome);
    }

    // The update may have installed or replaced the start program.
    let server = match prepare_server(&settings, settings_path) {
        Ok(command) => command,
        Err(err) => {
            println!("{err}");
            return Ok(RunOutcome::Rejected(err));
        }
    };

    Ok(run_server(&settings, &server, interrupt()).await)
}

/// Refuse to go any further when `start` is empty.
pub fn ensure_start_command(
    settings: &Settings,
    settings_path: &Path,
) -> Result<(), LaunchError> {
    if settings.has_start_command() {
        return Ok(());
    }

    Err(LaunchError::MissingStartCommand {
        settings_path: settings_path.display().to_string(),
    })
}

/// Assemble the server command line and check a path-like start program exists.
pub fn prepare_server(
    settings: &Settings,
    settings_path: &Path,
) -> Result<LaunchCommand, LaunchError> {
    ensure_start_command(settings, settings_path)?;

    let command = LaunchCommand::assemble(settings)?;
    command.ensure_program_exists(settings_path)?;
    Ok(command)
}

/// Run the update command, if any.
///
/// Returns `Some` when the run must stop before the server is launched.
pub async fn run_update<F>(settings: &Settings, interrupt: F) -> Option<RunOutcome>
where
    F: Future<Output = ()>,
{
    if !settings.has_update_command() {
        println!("No update command set, skipping update...");
        return None;
    }

    let command = match LaunchCommand::from_line(settings.update.as_str()) {
        Ok(command) => command,
        Err(err) => {
            println!("{err}");
            return Some(RunOutcome::Rejected(err));
        }
    };

    println!("Updating with '{}'...", command.command_line());
    match run_child(&command, UPDATE_STAGE, interrupt).await {
        ChildOutcome::Exited(0) => None,
        ChildOutcome::Exited(code) => {
            println!("Update failed with code {code}");
            Some(RunOutcome::UpdateFailed(code))
        }
        ChildOutcome::Interrupted => {
            println!("Update cancelled...");
            Some(RunOutcome::UpdateInterrupted)
        }
        ChildOutcome::Failed(err) => {
            println!("Could not run update ({err}), continuing...");
            None
        }
    }
}

/// Run the server and translate how it ended.
pub async fn run_server<F>(
    settings: &Settings,
    command: &LaunchCommand,
    interrupt: F,
) -> RunOutcome
where
    F: Future<Output = ()>,
{
    println!("Mode: '{}'", settings.mode);
    println!("Opening '{}'...", command.command_line());

    match run_child(command, SERVER_STAGE, interrupt).await {
        ChildOutcome::Exited(code) => {
            println!("Server closed with code {code}");
            RunOutcome::ServerExited(code)
        }
        ChildOutcome::Interrupted => {
            println!("Server closed...");
            RunOutcome::ServerInterrupted
        }
        ChildOutcome::Failed(_) => RunOutcome::ServerFailed,
    }
}
