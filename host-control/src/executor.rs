//! Running the host's rotation command.

use std::process::{Child, Command, Stdio};

use crate::error::ExecError;

/// Applies a rendered rotation command line.
pub trait ActionExecutor {
    /// Starts `command`. Must not wait for it to finish.
    fn execute(&mut self, command: &str) -> Result<(), ExecError>;
}

/// Hands commands to the platform shell in the background.
///
/// Children are reaped on later calls; failures are only logged.
#[derive(Debug, Default)]
pub struct ShellExecutor {
    running: Vec<Child>,
}

impl ShellExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn shell(command: &str) -> Command {
        #[cfg(windows)]
        let mut shell = {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        };
        #[cfg(not(windows))]
        let mut shell = {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        };
        shell.arg(command).stdin(Stdio::null());
        shell
    }

    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) if status.success() => false,
            Ok(Some(status)) => {
                tracing::warn!(pid = child.id(), %status, "rotation command failed");
                false
            },
            Ok(None) => true,
            Err(e) => {
                tracing::warn!(pid = child.id(), error = %e, "lost track of rotation command");
                false
            },
        });
    }

    /// Number of commands started but not yet seen to exit.
    pub fn in_flight(&self) -> usize {
        self.running.len()
    }
}

impl ActionExecutor for ShellExecutor {
    fn execute(&mut self, command: &str) -> Result<(), ExecError> {
        self.reap();
        let child = Self::shell(command)
            .spawn()
            .map_err(|source| ExecError { command: command.to_owned(), source })?;
        tracing::debug!(pid = child.id(), "rotation command started");
        self.running.push(child);
        Ok(())
    }
}
