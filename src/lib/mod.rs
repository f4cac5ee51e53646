//! Shared library modules providing error types, settings file utilities, and telemetry initialization.

pub mod errors;
pub mod fs;
pub mod telemetry;
