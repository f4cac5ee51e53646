//! Command assembly for the update and server children.

use std::{path::Path, process::Stdio};

use tokio::process::Command;

use crate::{lib::errors::LaunchError, settings::Settings};

/// A command ready to spawn without a shell.
///
/// `command_line` keeps the space-joined text operators see in the console;
/// `program` and `args` are the words it splits into under POSIX quoting
/// rules. Shell metacharacters inside the words are passed through literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    command_line: String,
    program: String,
    args: Vec<String>,
}

impl LaunchCommand {
    /// Server command: `start`, then `default_args`, then the active mode's arguments.
    pub fn assemble(settings: &Settings) -> Result<Self, LaunchError> {
        let command_line = [
            settings.start.as_str(),
            settings.default_args.as_str(),
            settings.mode_args(),
        ]
        .join(" ");
        Self::from_line(command_line)
    }

    /// Split a command line into a program and its arguments.
    pub fn from_line(command_line: impl Into<String>) -> Result<Self, LaunchError> {
        let command_line = command_line.into();
        let Some(words) = shlex::split(&command_line) else {
            return Err(LaunchError::InvalidCommand {
                command_line,
                reason: "unbalanced quotes or trailing escape",
            });
        };

        let mut words = words.into_iter();
        let Some(program) = words.next() else {
            return Err(LaunchError::InvalidCommand {
                command_line,
                reason: "no program to run",
            });
        };

        Ok(Self {
            command_line,
            program,
            args: words.collect(),
        })
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Refuse a path-like program that does not exist.
    ///
    /// Bare names are left for the OS to resolve through `PATH`.
    pub fn ensure_program_exists(&self, settings_path: &Path) -> Result<(), LaunchError> {
        if !is_path_like(&self.program) || Path::new(&self.program).exists() {
            return Ok(());
        }

        Err(LaunchError::ExecutableNotFound {
            program: self.program.clone(),
            settings_path: settings_path.display().to_string(),
        })
    }

    /// Build a child command with the operator's stdin, stdout and stderr attached.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.kill_on_drop(true);
        command.args(&self.args);
        command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }
}

fn is_path_like(program: &str) -> bool {
    program.contains('/') || program.contains(std::path::MAIN_SEPARATOR)
}
