//! Template fetching. Git repositories are cloned, local directories are
//! copied, both straight into the project directory.

use crate::error::Result;
use crate::resolver::TemplateSource;
use std::path::Path;

pub mod git;
pub mod interface;
pub mod local;

pub use git::GitLoader;
pub use interface::TemplateLoader;
pub use local::LocalLoader;

/// Materializes `source` at `target_dir`.
///
/// # Errors
/// * `Error::CloneError` if the template cannot be fetched
pub fn fetch_template(source: &TemplateSource, target_dir: &Path) -> Result<()> {
    println!("Using template from the {source}");

    let loader: Box<dyn TemplateLoader + '_> = match source {
        TemplateSource::Git(repo) => Box::new(GitLoader::new(repo)),
        TemplateSource::FileSystem(path) => Box::new(LocalLoader::new(path)),
    };

    loader.load(target_dir)
}
