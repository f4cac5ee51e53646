use std::process::ExitCode;

use anyhow::Error;

/// Bundles a fatal error message with the exit code reported for it.
#[derive(Debug)]
pub struct LauncherExit {
    message: String,
    exit_code: ExitCode,
}

impl LauncherExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        // Library errors already render their source in `Display`.
        let err = err.into();
        Self {
            message: format!("{err}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
