//! Dependency installation in the generated project.

use crate::error::{Error, Result};
use crate::runner::CommandRunner;
use crate::settings::ToolCommand;
use std::path::Path;

/// Runs the package installer in `root`.
///
/// # Errors
/// * `Error::InstallError` if the installer cannot be started or fails
pub fn install(root: &Path, command: &ToolCommand, runner: &dyn CommandRunner) -> Result<()> {
    println!("\n> Install packages.");
    runner.run(command, root).map_err(|e| Error::InstallError(e.to_string()))
}
