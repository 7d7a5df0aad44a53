//! Reads the project configuration back from disk.

use crate::constants::artifacts;
use log::debug;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Configuration values persisted in a project. Placeholders and empty
/// values read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfigs {
    pub name: Option<String>,
    pub drive_folder: Option<String>,
    /// Dataset declared by the template in `sheetbase.config.json`.
    pub template_database: Option<String>,
    pub backend_script: Option<String>,
    pub database: Option<String>,
    pub content_folder: Option<String>,
    pub backend: Option<String>,
}

/// True for the `<...>` sentinels written when an id is unavailable.
pub fn is_placeholder(value: &str) -> bool {
    value.starts_with('<') && value.ends_with('>')
}

fn meaningful(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty() && !is_placeholder(v))
}

fn read_json(path: &Path) -> Option<serde_json::Value> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw)
        .map_err(|e| debug!("Unable to parse '{}': {e}", path.display()))
        .ok()
}

fn json_field(document: Option<&serde_json::Value>, key: &str) -> Option<String> {
    meaningful(document?.get(key)?.as_str().map(str::to_string))
}

/// Extracts the value of the first `"key": "..."` declaration in `text`.
pub fn quoted_field(text: &str, key: &str) -> Option<String> {
    let re = Regex::new(&format!(r#""{}": "([^"]*)""#, regex::escape(key))).ok()?;
    let value = re.captures(text)?.get(1)?.as_str().to_string();
    meaningful(Some(value))
}

impl ProjectConfigs {
    /// Loads whatever configuration exists below `root`. Never fails.
    pub fn load(root: &Path) -> Self {
        let sheetbase = read_json(&root.join(artifacts::SHEETBASE_CONFIG));
        let clasp = read_json(&root.join(artifacts::CLASP_JSON));
        let backend = fs::read_to_string(root.join(artifacts::BACKEND_CONFIG)).unwrap_or_default();
        let frontend =
            fs::read_to_string(root.join(artifacts::FRONTEND_CONFIG)).unwrap_or_default();

        Self {
            name: json_field(sheetbase.as_ref(), "name"),
            drive_folder: json_field(sheetbase.as_ref(), "driveFolder"),
            template_database: json_field(sheetbase.as_ref(), "database")
                .or_else(|| quoted_field(&backend, "database")),
            backend_script: json_field(clasp.as_ref(), "scriptId"),
            database: quoted_field(&backend, "database")
                .or_else(|| quoted_field(&frontend, "database")),
            content_folder: quoted_field(&backend, "contentFolder"),
            backend: quoted_field(&frontend, "backend"),
        }
    }
}
