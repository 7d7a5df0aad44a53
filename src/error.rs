//! Error handling for the Sheetbase project generator.
//! Defines the error type and result alias used throughout the application.

use thiserror::Error;

/// Errors that can occur while creating a project.
///
/// The first group are the fatal pipeline errors, each reported with its own
/// diagnostic. The second group wraps errors from the underlying crates.
#[derive(Error, Debug)]
pub enum Error {
    /// The sanitized target directory is already taken.
    #[error("Directory '{dir}' exists, try another name or delete it!")]
    DirectoryExistsError { dir: String },

    /// The template could not be fetched.
    #[error("Repo does not exist or cannot be fetched! Repo: {repo} ({reason})")]
    CloneError { repo: String, reason: String },

    /// A configuration artifact could not be read, parsed or written.
    #[error("Error setting up project configuration in '{path}': {reason}")]
    ConfigWriteError { path: String, reason: String },

    /// History reset, commit or remote setup failed.
    #[error("Error setting up git! You may check your .git URL or connection. ({0})")]
    VersionControlError(String),

    /// The backend upload tool failed.
    #[error("Error trying to push backend script: {0}")]
    DeployError(String),

    /// The package installer failed.
    #[error("Error trying to install packages: {0}")]
    InstallError(String),

    /// A single cloud request failed. Never escapes the provisioner.
    #[error("Cloud provisioning error: {0}")]
    ProvisionError(String),

    /// Interactive input could not be read.
    #[error("Prompt error: {0}")]
    PromptError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    #[error("Pattern error: {0}.")]
    RegexError(#[from] regex::Error),

    #[error("HTTP error: {0}.")]
    HttpError(#[from] reqwest::Error),
}

/// Convenience type alias for Results with Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("\n{}", console::style(err).red());
    std::process::exit(1);
}
