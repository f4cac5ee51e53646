//! Terminal states of a child process and of a whole launcher run.
use std::{
    io,
    process::{ExitCode, ExitStatus},
};

use crate::lib::errors::LaunchError;

/// Exit status used when a signal-terminated child has no portable code.
const FALLBACK_FAILURE_CODE: i32 = 1;
/// Unix convention for "terminated by signal N": 128 + N.
#[cfg(unix)]
const SIGNAL_EXIT_BASE: i32 = 128;

/// How a single child process ended.
///
/// There is no timeout variant: children are never run under a deadline.
#[derive(Debug)]
pub enum ChildOutcome {
    /// The child ran to completion with this exit code.
    Exited(i32),
    /// The operator interrupted the launcher while the child was running.
    Interrupted,
    /// The child could not be spawned or waited on.
    Failed(io::Error),
}

impl ChildOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            ChildOutcome::Exited(_) => "exited",
            ChildOutcome::Interrupted => "interrupted",
            ChildOutcome::Failed(_) => "failed",
        }
    }

    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            ChildOutcome::Exited(code) => Some(*code),
            _ => None,
        }
    }
}

/// How a launcher run ended, before conversion into a process status.
#[derive(Debug)]
pub enum RunOutcome {
    /// `--exit` was given; settings were applied and nothing was launched.
    ExitRequested,
    /// The launch was refused before spawning anything.
    Rejected(LaunchError),
    /// The update command exited non-zero.
    UpdateFailed(i32),
    /// The operator interrupted the update command.
    UpdateInterrupted,
    /// The server exited on its own with this code.
    ServerExited(i32),
    /// The operator interrupted the server; treated as a clean shutdown.
    ServerInterrupted,
    /// The server process could not be run; swallowed as success.
    ServerFailed,
}

impl RunOutcome {
    /// Numeric process status for this outcome.
    pub fn status_code(&self) -> i32 {
        match self {
            RunOutcome::ExitRequested
            | RunOutcome::ServerInterrupted
            | RunOutcome::ServerFailed => 0,
            RunOutcome::Rejected(err) => i32::from(err.exit_code()),
            RunOutcome::UpdateInterrupted => 1,
            RunOutcome::UpdateFailed(code) | RunOutcome::ServerExited(code) => *code,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        to_exit_code(self.status_code())
    }
}

/// Exit code of a finished child, mapping signal termination to 128 + signal.
pub fn status_to_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return SIGNAL_EXIT_BASE + signal;
        }
    }

    FALLBACK_FAILURE_CODE
}

pub fn to_exit_code(code: i32) -> ExitCode {
    ExitCode::from(wrap_status(code))
}

/// Truncate a status to the 8 bits a process can report, as the OS does.
pub const fn wrap_status(code: i32) -> u8 {
    (code & 0xff) as u8
}
