//! Sheetbase project generator.
//! Creates a project from a template, provisions its Drive and Apps Script
//! resources, writes generated secrets and resource ids into its
//! configuration and sets up a fresh git history.

/// Command-line interface
pub mod cli;

/// Cloud client capability and resource provisioning
pub mod cloud;

/// Reading persisted project configuration
pub mod configs;

pub mod constants;

/// Optional backend upload and web-app id capture
pub mod deploy;

/// Error types and handling
pub mod error;

/// Package installation
pub mod install;

/// Template fetching from git repositories and local directories
pub mod loader;

/// Stage sequencing and abort/continue decisions
pub mod pipeline;

/// User interaction
pub mod prompt;

/// Rendering of rewrite values
pub mod renderer;

/// Final status report
pub mod report;

/// Template reference and project name resolution
pub mod resolver;

/// Configuration artifact rewriting
pub mod rewrite;

/// External command execution
pub mod runner;

/// Generated credentials
pub mod secrets;

/// Run configuration
pub mod settings;

/// Git baseline and remote
pub mod vcs;
