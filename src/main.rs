//! Entry point for the dedicated server launcher.
use std::process::ExitCode;

use clap::Parser;
use srv_launcher::{
    cli::LaunchArgs,
    launcher::{self, LauncherExit},
    lib::telemetry,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match bootstrap().await {
        Ok(code) => code,
        Err(exit) => exit.report(),
    }
}

async fn bootstrap() -> Result<ExitCode, LauncherExit> {
    telemetry::init_tracing().map_err(LauncherExit::from_error)?;
    let args = LaunchArgs::parse();
    let profile = args.into_profile().map_err(LauncherExit::from_error)?;

    let outcome = launcher::run(&profile, launcher::operator_interrupt)
        .await
        .map_err(LauncherExit::from_error)?;
    Ok(outcome.exit_code())
}
