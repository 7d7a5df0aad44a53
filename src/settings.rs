//! Run configuration derived from the command line.

use crate::cli::Args;
use crate::constants::DEFAULT_ORG;

/// What the user asked for regarding a git remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteRequest {
    /// No remote is attached.
    None,
    /// Ask for the URL once the baseline commit exists.
    Prompt,
    /// Attach this URL if it is valid.
    Url(String),
}

impl RemoteRequest {
    /// Maps the `--remote [URL]` option. An empty value means "prompt".
    pub fn from_option(remote: Option<&str>) -> Self {
        match remote {
            None => Self::None,
            Some(url) if url.trim().is_empty() => Self::Prompt,
            Some(url) => Self::Url(url.trim().to_string()),
        }
    }
}

/// External command made of a program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Organisation used to expand short template names.
    pub org: String,
    pub remote: RemoteRequest,
    /// Whether prompts and the browser checkpoint are shown.
    pub interactive: bool,
    /// Whether the package installer runs.
    pub install: bool,
    /// Package installer, run in the project root.
    pub installer: ToolCommand,
    /// Backend upload tool, run in `backend/`.
    pub deployer: ToolCommand,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            remote: RemoteRequest::None,
            interactive: true,
            install: true,
            installer: ToolCommand::new("npm", &["install"]),
            deployer: ToolCommand::new("clasp", &["push"]),
        }
    }
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            org: args.org.clone(),
            remote: RemoteRequest::from_option(args.remote.as_deref()),
            interactive: !args.non_interactive,
            install: !args.skip_install,
            ..Self::default()
        }
    }
}
