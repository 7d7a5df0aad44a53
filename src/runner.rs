//! Execution of external tools (package installer, backend upload tool).

use crate::error::{Error, Result};
use crate::settings::ToolCommand;
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs external commands to completion. Only success or failure matters.
pub trait CommandRunner {
    /// Runs `command` inside `cwd` with the terminal inherited.
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<()>;
}

/// Runs commands as child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<()> {
        debug!("Running '{}' in '{}'", command, cwd.display());

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(Error::IoError)?;

        if !status.success() {
            return Err(Error::IoError(std::io::Error::other(format!(
                "'{command}' failed with status: {status}"
            ))));
        }

        Ok(())
    }
}
