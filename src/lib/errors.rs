use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while reading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Failed to read the settings file from disk.
    #[error("Failed to read settings file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Failed to deserialize JSON into the settings record.
    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Failed to serialize or write the settings file.
    #[error("Failed to write settings file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SettingsError {
    pub fn from_read_error(path: PathBuf, source: io::Error) -> Self {
        Self::FileRead { path, source }
    }

    pub fn from_parse_error(path: PathBuf, source: serde_json::Error) -> Self {
        Self::Parse { path, source }
    }

    pub fn from_write_error(path: PathBuf, source: io::Error) -> Self {
        Self::FileWrite { path, source }
    }
}

/// Failures detected before a child process is spawned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LaunchError {
    /// `start` is empty, nothing to launch.
    #[error("No start command set. Set `start` in {settings_path}...")]
    MissingStartCommand { settings_path: String },
    /// The start program looks like a path but nothing exists there.
    #[error("'{program}' not found. Set it correctly in {settings_path}...")]
    ExecutableNotFound {
        program: String,
        settings_path: String,
    },
    /// The assembled command line could not be split into words.
    #[error("Invalid command line `{command_line}`: {reason}")]
    InvalidCommand {
        command_line: String,
        reason: &'static str,
    },
}

impl LaunchError {
    /// Process exit status reported for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            LaunchError::MissingStartCommand { .. } => 2,
            LaunchError::ExecutableNotFound { .. } | LaunchError::InvalidCommand { .. } => 1,
        }
    }
}
