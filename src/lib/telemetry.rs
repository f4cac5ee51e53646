//! Telemetry initialization and launch event helpers.

use std::time::Instant;

use anyhow::Result;
use tracing::{info, info_span, Span};
use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset. The console belongs to the server.
const DEFAULT_FILTER: &str = "warn";

/// Initialize `tracing` and format developer logs on stderr.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper recording the start and finish of one child process.
pub struct ChildSpan {
    span: Span,
    started_at: Instant,
    stage: &'static str,
}

impl ChildSpan {
    /// Start a span for the `update` or `server` stage.
    pub fn start(stage: &'static str, command_line: &str) -> Self {
        let span = info_span!(
            target: "srv_launcher::launcher",
            "child_process",
            stage,
            command_line
        );
        Self {
            span,
            started_at: Instant::now(),
            stage,
        }
    }

    /// Close the span while recording the outcome.
    pub fn finish(self, outcome: &'static str, exit_code: Option<i32>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        info!(
            target: "srv_launcher::launcher",
            stage = self.stage,
            outcome,
            exit_code,
            elapsed_ms,
            "Child process finished"
        );
    }
}
