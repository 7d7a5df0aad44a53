//! Turns the user supplied template reference and project name into a
//! canonical template source and a safe target directory.

use crate::constants::TEMPLATE_PREFIX;
use crate::error::{Error, Result};
use crate::settings::RemoteRequest;
use std::path::{Path, PathBuf};

/// Represents the source location of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Local filesystem template path
    FileSystem(PathBuf),
    /// Git repository URL
    Git(String),
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::FileSystem(path) => {
                write!(f, "local path: '{}'", path.display())
            }
            TemplateSource::Git(repo) => write!(f, "git repository: '{repo}'"),
        }
    }
}

impl TemplateSource {
    /// Resolves a template reference.
    ///
    /// Full git locators (starting with `https://github.com` or ending with
    /// `.git`) are kept as they are, existing local directories are used in
    /// place, and anything else is treated as a short template name and
    /// expanded to `https://github.com/<org>/sheetbase-<name>.git`.
    pub fn from_string(s: &str, org: &str) -> Self {
        if s.starts_with("https://github.com") || s.ends_with(".git") {
            return Self::Git(s.to_string());
        }

        let path = Path::new(s);
        if path.is_dir() {
            return Self::FileSystem(path.to_path_buf());
        }

        Self::Git(format!("https://github.com/{org}/{TEMPLATE_PREFIX}{s}.git"))
    }
}

/// Maps every character outside `[A-Za-z0-9_]` to `-`.
///
/// Single pass and idempotent: the output only contains safe characters, so
/// sanitizing it again changes nothing.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '-' })
        .collect()
}

/// A validated request to create a project.
#[derive(Debug, Clone)]
pub struct ProjectRequest {
    pub source: TemplateSource,
    /// Sanitized project name, also the directory name.
    pub name: String,
    /// Directory the project is created in.
    pub target_dir: PathBuf,
    pub remote: RemoteRequest,
}

/// Builds a [`ProjectRequest`] rooted at `base_dir`.
///
/// # Arguments
/// * `base_dir` - Directory the project folder is created in
/// * `template` - Short template name, git URL or local path
/// * `name` - Requested project name
/// * `org` - Organization short template names expand under
/// * `remote` - How the git remote is obtained
///
/// # Returns
/// * `Result<ProjectRequest>` - Resolved source, sanitized name and target
///
/// # Errors
/// * `Error::DirectoryExistsError` if anything already exists at the
///   sanitized target path
pub fn resolve<P: AsRef<Path>>(
    base_dir: P,
    template: &str,
    name: &str,
    org: &str,
    remote: RemoteRequest,
) -> Result<ProjectRequest> {
    let name = sanitize_name(name);
    let target_dir = base_dir.as_ref().join(&name);

    // symlink_metadata so that dangling links count as taken too
    if target_dir.symlink_metadata().is_ok() {
        return Err(Error::DirectoryExistsError { dir: name });
    }

    let source = TemplateSource::from_string(template, org);
    log::debug!("Resolved template to {source}, target '{}'", target_dir.display());

    Ok(ProjectRequest { source, name, target_dir, remote })
}
