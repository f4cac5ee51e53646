use std::{future::Future, time::Duration};

use tokio::{process::Child, time};
use tracing::{debug, warn};

use crate::lib::telemetry::ChildSpan;

use super::{
    outcome::{status_to_code, ChildOutcome},
    plan::LaunchCommand,
};

pub const UPDATE_STAGE: &str = "update";
pub const SERVER_STAGE: &str = "server";

/// Time a child gets to exit on its own after the operator interrupt.
const INTERRUPT_GRACE: Duration = Duration::from_millis(250);

/// Resolve once the operator sends an interrupt (Ctrl-C).
///
/// If the signal handler cannot be installed the future never resolves, so a
/// child is never treated as interrupted by mistake.
pub async fn operator_interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            target: "srv_launcher::launcher",
            error = %err,
            "Failed to listen for interrupt; Ctrl-C will not be handled"
        );
        std::future::pending::<()>().await;
    }
}

/// Spawn `command` with inherited stdio and block until it exits or `interrupt` resolves.
pub async fn run_child<F>(
    command: &LaunchCommand,
    stage: &'static str,
    interrupt: F,
) -> ChildOutcome
where
    F: Future<Output = ()>,
{
    let span = ChildSpan::start(stage, command.command_line());
    let outcome = match command.to_command().spawn() {
        Ok(child) => wait_or_interrupt(child, interrupt).await,
        Err(err) => ChildOutcome::Failed(err),
    };

    if let ChildOutcome::Failed(err) = &outcome {
        if failure_is_quiet(stage) {
            debug!(
                target: "srv_launcher::launcher",
                stage,
                program = command.program(),
                error = %err,
                "Child process failed to run"
            );
        } else {
            warn!(
                target: "srv_launcher::launcher",
                stage,
                program = command.program(),
                error = %err,
                "Child process failed to run"
            );
        }
    }
    span.finish(outcome.label(), outcome.exit_code());
    outcome
}

/// A server that cannot be run ends the launcher silently with status 0.
fn failure_is_quiet(stage: &str) -> bool {
    stage == SERVER_STAGE
}

async fn wait_or_interrupt<F>(mut child: Child, interrupt: F) -> ChildOutcome
where
    F: Future<Output = ()>,
{
    tokio::select! {
        status = child.wait() => match status {
            Ok(status) => ChildOutcome::Exited(status_to_code(status)),
            Err(err) => ChildOutcome::Failed(err),
        },
        _ = interrupt => {
            shut_down(&mut child).await;
            ChildOutcome::Interrupted
        }
    }
}

/// The terminal delivers the interrupt to the child too; give it a moment, then kill.
async fn shut_down(child: &mut Child) {
    match time::timeout(INTERRUPT_GRACE, child.wait()).await {
        Ok(Ok(status)) => {
            debug!(
                target: "srv_launcher::launcher",
                code = status_to_code(status),
                "Child exited after interrupt"
            );
        }
        Ok(Err(err)) => {
            warn!(
                target: "srv_launcher::launcher",
                error = %err,
                "Failed to wait for child after interrupt"
            );
        }
        Err(_) => {
            if let Err(err) = child.kill().await {
                warn!(
                    target: "srv_launcher::launcher",
                    error = %err,
                    "Failed to kill child after interrupt"
                );
            }
        }
    }
}
