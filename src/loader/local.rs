use crate::constants::TEMPLATE_IGNORE;
use crate::error::{Error, Result};
use crate::loader::interface::TemplateLoader;
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Loader for templates from the local filesystem.
pub struct LocalLoader<P: AsRef<Path>> {
    path: P,
}

impl<P: AsRef<Path>> LocalLoader<P> {
    /// Creates a new LocalLoader instance.
    pub fn new(path: P) -> Self {
        Self { path }
    }
}

/// Builds the set of paths never copied from a local template.
pub fn ignored_patterns() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in TEMPLATE_IGNORE {
        builder.add(Glob::new(pattern).map_err(|e| clone_error(pattern, e))?);
    }
    builder.build().map_err(|e| clone_error("ignore patterns", e))
}

fn clone_error<D: std::fmt::Display>(repo: &str, e: D) -> Error {
    Error::CloneError { repo: repo.to_string(), reason: e.to_string() }
}

/// Absolute form of `path`, resolving the deepest existing ancestor so that
/// paths not created yet still compare equal to walked entries.
fn absolute(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            absolute(parent).join(name)
        }
        _ => std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf()),
    }
}

impl<P: AsRef<Path>> TemplateLoader for LocalLoader<P> {
    /// Copies the template tree into `target_dir`, skipping ignored paths.
    ///
    /// When `target_dir` lies inside the template it is left out of the walk.
    ///
    /// # Errors
    /// * `Error::CloneError` if the path does not exist or copying fails
    fn load(&self, target_dir: &Path) -> Result<()> {
        let repo = self.path.as_ref().display().to_string();
        if !self.path.as_ref().is_dir() {
            return Err(clone_error(&repo, "template path does not exist"));
        }
        let root = absolute(self.path.as_ref());
        let target = absolute(target_dir);
        if root.starts_with(&target) {
            return Err(clone_error(&repo, "target directory contains the template"));
        }

        let ignored = ignored_patterns()?;
        let entries = WalkDir::new(&root).into_iter().filter_entry(|entry| {
            entry.path() != target
                && entry
                    .path()
                    .strip_prefix(&root)
                    .map(|rel| !ignored.is_match(rel))
                    .unwrap_or(true)
        });

        for entry in entries {
            let entry = entry.map_err(|e| clone_error(&repo, e))?;
            let relative = entry.path().strip_prefix(&root).map_err(|e| clone_error(&repo, e))?;
            let dest = target_dir.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&dest).map_err(|e| clone_error(&repo, e))?;
            } else {
                debug!("Copying file: {}", dest.display());
                fs::copy(entry.path(), &dest).map_err(|e| clone_error(&repo, e))?;
            }
        }

        Ok(())
    }
}
