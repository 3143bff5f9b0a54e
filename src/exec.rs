//! Command execution behind the [`Executor`] trait.
//!
//! The dispatch loop only ever hands a fully expanded command line to an
//! [`Executor`]; production code uses [`SystemExecutor`], tests inject a
//! recording double.
use anyhow::{Context as _, Result};
use std::process::{Command, ExitStatus};

use crate::platform::Platform;

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Exit code, if the process produced one (not the case when killed by a
    /// signal).
    pub code: Option<i32>,
}

impl RunStatus {
    /// A successful status with exit code 0.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A failed status with the given exit code.
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Runs expanded command lines.
pub trait Executor {
    /// Run `command_line` to completion and return its status.
    ///
    /// Standard streams are inherited; the output is never inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the command could not be started at all.
    fn run(&self, command_line: &str) -> Result<RunStatus>;
}

/// Production [`Executor`] that runs command lines through the platform
/// shell (`sh -c` or `cmd /C`), so quoting written in templates applies.
#[derive(Debug, Clone, Copy)]
pub struct SystemExecutor {
    platform: Platform,
}

impl SystemExecutor {
    /// Create an executor for `platform`.
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

impl Default for SystemExecutor {
    fn default() -> Self {
        Self::new(Platform::detect())
    }
}

impl Executor for SystemExecutor {
    fn run(&self, command_line: &str) -> Result<RunStatus> {
        let (shell, flag) = self.platform.shell();
        let status = Command::new(shell)
            .arg(flag)
            .arg(command_line)
            .status()
            .with_context(|| format!("failed to execute: {command_line}"))?;
        Ok(RunStatus::from(status))
    }
}
