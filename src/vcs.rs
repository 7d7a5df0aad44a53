//! Version-control baseline for a new project: drop the template's history,
//! start a fresh repository and commit everything.

use crate::error::{Error, Result};
use git2::{IndexAddOption, Oid, Repository, Signature};
use log::debug;
use std::fs;
use std::path::Path;
use url::Url;

/// Whether `url` is a well-formed `https://` URL ending in `.git`.
pub fn is_valid_git_url(url: &str) -> bool {
    if !url.starts_with("https://") || !url.ends_with(".git") {
        return false;
    }
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().is_some(),
        Err(_) => false,
    }
}

fn vcs_error<D: std::fmt::Display>(e: D) -> Error {
    Error::VersionControlError(e.to_string())
}

/// Removes the `.git` directory inherited from the template, if any.
pub fn remove_history(root: &Path) -> Result<()> {
    let git_dir = root.join(".git");
    if git_dir.exists() {
        debug!("Removing inherited history at '{}'", git_dir.display());
        fs::remove_dir_all(&git_dir).map_err(vcs_error)?;
    }
    Ok(())
}

fn signature(repo: &Repository) -> Result<Signature<'static>> {
    repo.signature()
        .or_else(|_| Signature::now("Sheetbase", "sheetbase@localhost"))
        .map_err(vcs_error)
}

/// Stages every file in the working tree and commits it on top of HEAD.
pub fn commit_all(repo: &Repository, message: &str) -> Result<Oid> {
    let mut index = repo.index().map_err(vcs_error)?;
    index.add_all(["*"], IndexAddOption::DEFAULT, None).map_err(vcs_error)?;
    index.write().map_err(vcs_error)?;
    let tree_id = index.write_tree().map_err(vcs_error)?;
    let tree = repo.find_tree(tree_id).map_err(vcs_error)?;

    let parent = match repo.head() {
        Ok(head) => Some(head.peel_to_commit().map_err(vcs_error)?),
        Err(_) => None,
    };
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    let signature = signature(repo)?;
    let oid = repo
        .commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .map_err(vcs_error)?;
    debug!("Committed {oid}: {message}");
    Ok(oid)
}

/// Attaches `url` as remote `name`. Nothing is pushed.
pub fn add_remote(repo: &Repository, name: &str, url: &str) -> Result<()> {
    repo.remote(name, url).map_err(vcs_error)?;
    debug!("Added remote '{name}' -> {url}");
    Ok(())
}

/// Opens the repository created by [`initialize`].
pub fn open(root: &Path) -> Result<Repository> {
    Repository::open(root).map_err(vcs_error)
}

/// Replaces the inherited history with a fresh repository holding a single
/// baseline commit.
///
/// # Errors
/// * `Error::VersionControlError` on any failure
pub fn initialize(root: &Path, message: &str) -> Result<Repository> {
    remove_history(root)?;
    let repo = Repository::init(root).map_err(vcs_error)?;
    commit_all(&repo, message)?;
    Ok(repo)
}
