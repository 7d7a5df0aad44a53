use crate::error::Result;
use std::path::Path;

/// Trait for loading templates from different sources.
pub trait TemplateLoader {
    /// Places the template content at `target_dir`, which must not exist yet.
    fn load(&self, target_dir: &Path) -> Result<()>;
}
