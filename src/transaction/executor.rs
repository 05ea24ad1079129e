//! Process execution boundary.
//!
//! The committer only ever talks to an [`Executor`]; [`ProcessExecutor`] is the
//! real implementation backed by `std::process`.

use std::path::Path;
use std::process::{Command as ProcessCommand, Stdio};

use super::Command;
use crate::error::ExecError;

/// Runs external commands in a given working directory
pub trait Executor {
    /// Run with inherited stdio; error on launch failure or non-zero exit
    fn run(&self, command: &Command, workdir: &Path) -> Result<(), ExecError>;

    /// Run with captured stdout; error on launch failure or non-zero exit
    fn capture(&self, command: &Command, workdir: &Path) -> Result<String, ExecError>;
}

impl<T: Executor + ?Sized> Executor for &T {
    fn run(&self, command: &Command, workdir: &Path) -> Result<(), ExecError> {
        (**self).run(command, workdir)
    }

    fn capture(&self, command: &Command, workdir: &Path) -> Result<String, ExecError> {
        (**self).capture(command, workdir)
    }
}

/// Executes commands as child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    fn prepare(command: &Command, workdir: &Path) -> Result<ProcessCommand, ExecError> {
        let program = which::which(command.program()).map_err(|e| ExecError::LaunchFailed {
            command: command.render(),
            reason: e.to_string(),
        })?;

        let mut process = ProcessCommand::new(program);
        process.args(command.arguments()).current_dir(workdir);
        Ok(process)
    }
}

impl Executor for ProcessExecutor {
    fn run(&self, command: &Command, workdir: &Path) -> Result<(), ExecError> {
        let status = Self::prepare(command, workdir)?
            .status()
            .map_err(|e| ExecError::LaunchFailed {
                command: command.render(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(ExecError::NonZeroExit {
                command: command.render(),
                status: status.to_string(),
                stderr: None,
            });
        }
        Ok(())
    }

    fn capture(&self, command: &Command, workdir: &Path) -> Result<String, ExecError> {
        let output = Self::prepare(command, workdir)?
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExecError::LaunchFailed {
                command: command.render(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ExecError::NonZeroExit {
                command: command.render(),
                status: output.status.to_string(),
                stderr: (!stderr.is_empty()).then_some(stderr),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ExecError::InvalidOutput {
            command: command.render(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_launch_failure() {
        let cmd = Command::new("fedflow-definitely-not-installed").arg("x");
        let err = ProcessExecutor
            .run(&cmd, Path::new("."))
            .expect_err("program does not exist");
        assert!(matches!(err, ExecError::LaunchFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_and_exit_status() {
        let out = ProcessExecutor
            .capture(&Command::new("sh").args(["-c", "echo hello"]), Path::new("."))
            .expect("sh runs");
        assert_eq!(out.trim(), "hello");

        let err = ProcessExecutor
            .run(&Command::new("sh").args(["-c", "exit 3"]), Path::new("."))
            .expect_err("non-zero exit");
        assert!(matches!(err, ExecError::NonZeroExit { .. }));
    }
}
