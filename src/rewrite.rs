//! Declarative rewriting of the generated project's configuration files.
//!
//! A [`RewriteSpec`] lists artifacts and the updates to apply to each one.
//! Structured artifacts (JSON documents) get key paths set; textual artifacts
//! get the first match of each pattern replaced. Values are MiniJinja
//! templates rendered against a [`RewriteContext`]. Artifacts missing from
//! the project are skipped.

use crate::cloud::ResourceSet;
use crate::constants::{artifacts, placeholders};
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::secrets::SecretBundle;
use log::debug;
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Values available to rewrite templates. Unavailable resource ids are
/// already replaced by their placeholders.
#[derive(Debug, Clone, Serialize)]
pub struct RewriteContext {
    pub name: String,
    pub api_key: String,
    pub encryption_key: String,
    /// Project folder id, or empty.
    pub drive_folder: String,
    pub content_folder: String,
    pub database: String,
    pub script_id: String,
    /// Deployed web-app id, or its placeholder.
    pub backend: String,
}

impl RewriteContext {
    pub fn new(
        name: &str,
        secrets: &SecretBundle,
        resources: &ResourceSet,
        backend: Option<&str>,
    ) -> Self {
        Self {
            name: name.to_string(),
            api_key: secrets.api_key().to_string(),
            encryption_key: secrets.encryption_key().to_string(),
            drive_folder: resources.project_folder.id_or("").to_string(),
            content_folder: resources.content_folder.id_or(placeholders::FOLDER_ID).to_string(),
            database: resources.database.id_or(placeholders::SPREADSHEET_ID).to_string(),
            script_id: resources.backend_script.id_or(placeholders::SCRIPT_ID).to_string(),
            backend: backend.unwrap_or(placeholders::WEBAPP_ID).to_string(),
        }
    }

    fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Update strategy for one artifact.
#[derive(Debug, Clone)]
pub enum FieldUpdates {
    /// `(key path, value template)` pairs. Key paths are dot separated.
    Structured(Vec<(String, String)>),
    /// `(pattern, replacement template)` pairs. Only the first match of each
    /// pattern is replaced.
    Textual(Vec<(String, String)>),
}

impl FieldUpdates {
    /// Key path updates from `(key, template)` pairs.
    pub fn keys(updates: &[(&str, &str)]) -> Self {
        Self::Structured(
            updates.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        )
    }

    /// Textual updates of `"key": "..."` declarations from `(key, template)`
    /// pairs.
    pub fn quoted(updates: &[(&str, &str)]) -> Self {
        Self::Textual(
            updates
                .iter()
                .map(|(key, value)| {
                    let pattern = format!(r#""{}": ".*""#, regex::escape(key));
                    (pattern, format!(r#""{key}": "{value}""#))
                })
                .collect(),
        )
    }

    fn apply(
        &self,
        content: &str,
        renderer: &dyn TemplateRenderer,
        context: &serde_json::Value,
    ) -> Result<String> {
        match self {
            FieldUpdates::Structured(updates) => {
                let mut document: serde_json::Value = serde_json::from_str(content)?;
                for (key_path, template) in updates {
                    let value = renderer.render(template, context)?;
                    set_key_path(&mut document, key_path, serde_json::Value::String(value))?;
                }
                let mut output = serde_json::to_string_pretty(&document)?;
                output.push('\n');
                Ok(output)
            }
            FieldUpdates::Textual(updates) => {
                let mut text = content.to_string();
                for (pattern, template) in updates {
                    let replacement = renderer.render(template, context)?;
                    let re = Regex::new(pattern)?;
                    text = re.replace(&text, NoExpand(&replacement)).into_owned();
                }
                Ok(text)
            }
        }
    }
}

/// Sets `value` at a dot separated key path, creating missing intermediate
/// objects.
///
/// # Errors
/// * `Error::ConfigWriteError` if the document or an intermediate value is
///   not an object
pub fn set_key_path(
    document: &mut serde_json::Value,
    key_path: &str,
    value: serde_json::Value,
) -> Result<()> {
    let (parents, last) = match key_path.rsplit_once('.') {
        Some((parents, last)) => (parents.split('.').collect(), last),
        None => (Vec::new(), key_path),
    };

    let mut current = document;
    for key in parents {
        current = as_object(current, key_path)?
            .entry(key.to_string())
            .or_insert(serde_json::Value::Null);
    }
    as_object(current, key_path)?.insert(last.to_string(), value);

    Ok(())
}

fn as_object<'a>(
    value: &'a mut serde_json::Value,
    key_path: &str,
) -> Result<&'a mut serde_json::Map<String, serde_json::Value>> {
    if value.is_null() {
        *value = serde_json::Value::Object(serde_json::Map::new());
    }
    value.as_object_mut().ok_or_else(|| Error::ConfigWriteError {
        path: key_path.to_string(),
        reason: "parent is not an object".to_string(),
    })
}

/// Updates applied to one artifact, addressed relative to the project root.
#[derive(Debug, Clone)]
pub struct ArtifactRewrite {
    pub path: PathBuf,
    pub updates: FieldUpdates,
}

impl ArtifactRewrite {
    pub fn new<P: Into<PathBuf>>(path: P, updates: FieldUpdates) -> Self {
        Self { path: path.into(), updates }
    }
}

/// Which artifacts were rewritten and which were absent.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RewriteReport {
    pub rewritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Ordered list of artifact rewrites.
#[derive(Debug, Clone, Default)]
pub struct RewriteSpec {
    pub artifacts: Vec<ArtifactRewrite>,
}

impl RewriteSpec {
    pub fn new(artifacts: Vec<ArtifactRewrite>) -> Self {
        Self { artifacts }
    }

    /// Rewrites applied right after the template is fetched.
    pub fn project() -> Self {
        Self::new(vec![
            ArtifactRewrite::new(
                artifacts::PACKAGE_JSON,
                FieldUpdates::keys(&[("name", "{{ name }}")]),
            ),
            ArtifactRewrite::new(
                artifacts::SHEETBASE_CONFIG,
                FieldUpdates::keys(&[
                    ("name", "{{ name }}"),
                    ("driveFolder", "{{ drive_folder }}"),
                ]),
            ),
            ArtifactRewrite::new(
                artifacts::CLASP_JSON,
                FieldUpdates::keys(&[("scriptId", "{{ script_id }}")]),
            ),
            ArtifactRewrite::new(
                artifacts::BACKEND_CONFIG,
                FieldUpdates::quoted(&[
                    ("apiKey", "{{ api_key }}"),
                    ("encryptionKey", "{{ encryption_key }}"),
                    ("database", "{{ database }}"),
                    ("contentFolder", "{{ content_folder }}"),
                ]),
            ),
            ArtifactRewrite::new(
                artifacts::FRONTEND_CONFIG,
                FieldUpdates::quoted(&[
                    ("apiKey", "{{ api_key }}"),
                    ("database", "{{ database }}"),
                    ("backend", "{{ backend }}"),
                ]),
            ),
        ])
    }

    /// Rewrite applied once the deployed web-app id is known.
    pub fn backend() -> Self {
        Self::new(vec![ArtifactRewrite::new(
            artifacts::FRONTEND_CONFIG,
            FieldUpdates::quoted(&[("backend", "{{ backend }}")]),
        )])
    }

    /// Applies every rewrite below `root`.
    ///
    /// # Arguments
    /// * `root` - Project directory the artifact paths are relative to
    /// * `renderer` - Renders each value template
    /// * `context` - Values available to the templates
    ///
    /// # Returns
    /// * `Result<RewriteReport>` - Artifacts rewritten and artifacts skipped
    ///   because they do not exist
    ///
    /// # Errors
    /// * `Error::ConfigWriteError` if an existing artifact cannot be read,
    ///   parsed, rendered or written
    pub fn apply(
        &self,
        root: &Path,
        renderer: &dyn TemplateRenderer,
        context: &RewriteContext,
    ) -> Result<RewriteReport> {
        let context = context.to_value()?;
        let mut report = RewriteReport::default();

        for artifact in &self.artifacts {
            let path = root.join(&artifact.path);
            if !path.is_file() {
                debug!("Skipping missing artifact '{}'", artifact.path.display());
                report.skipped.push(artifact.path.clone());
                continue;
            }

            rewrite_file(&path, &artifact.updates, renderer, &context).map_err(|e| {
                Error::ConfigWriteError {
                    path: artifact.path.display().to_string(),
                    reason: e.to_string(),
                }
            })?;
            debug!("Rewrote artifact '{}'", artifact.path.display());
            report.rewritten.push(artifact.path.clone());
        }

        Ok(report)
    }
}

fn rewrite_file(
    path: &Path,
    updates: &FieldUpdates,
    renderer: &dyn TemplateRenderer,
    context: &serde_json::Value,
) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let rewritten = updates.apply(&content, renderer, context)?;
    fs::write(path, rewritten)?;
    Ok(())
}
