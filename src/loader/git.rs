use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use log::debug;
use std::path::Path;

/// Loader for templates from git repositories.
pub struct GitLoader<S: AsRef<str>> {
    repo: S,
}

impl<S: AsRef<str>> GitLoader<S> {
    /// Creates a new GitLoader instance.
    pub fn new(repo: S) -> Self {
        Self { repo }
    }
}

impl<S: AsRef<str>> TemplateLoader for GitLoader<S> {
    /// Clones the repository into `target_dir`.
    ///
    /// # Errors
    /// * `Error::CloneError` if the clone fails
    fn load(&self, target_dir: &Path) -> Result<()> {
        let repo_url = self.repo.as_ref();
        debug!("Cloning '{}' to '{}'.", repo_url, target_dir.display());

        git2::build::RepoBuilder::new().clone(repo_url, target_dir).map(|_| ()).map_err(
            |e| Error::CloneError { repo: repo_url.to_string(), reason: e.message().to_string() },
        )
    }
}
