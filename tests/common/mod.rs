#![allow(dead_code)]

use serde_json::{json, Value};
use sheetbase::cloud::{AuthenticatedClient, Method};
use sheetbase::constants::{DRIVE_FILES_URL, SCRIPT_PROJECTS_URL};
use sheetbase::error::{Error, Result};
use sheetbase::prompt::Prompter;
use sheetbase::runner::CommandRunner;
use sheetbase::settings::{Settings, ToolCommand};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

/// Cloud client answering with fixed ids. URLs containing any of
/// `failing` return an error.
#[derive(Default)]
pub struct FakeClient {
    pub failing: Vec<String>,
    pub calls: RefCell<Vec<(Method, String, Value)>>,
}

impl FakeClient {
    pub fn failing(urls: &[&str]) -> Self {
        Self { failing: urls.iter().map(|u| u.to_string()).collect(), ..Self::default() }
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(_, url, _)| url.clone()).collect()
    }
}

impl AuthenticatedClient for FakeClient {
    fn request(&self, method: Method, url: &str, data: &Value) -> Result<Value> {
        self.calls.borrow_mut().push((method, url.to_string(), data.clone()));

        if self.failing.iter().any(|f| url.contains(f.as_str())) {
            return Err(Error::ProvisionError(format!("HTTP 500: {url}")));
        }

        if url == SCRIPT_PROJECTS_URL {
            return Ok(json!({ "scriptId": "script-id" }));
        }
        if url.ends_with("/copy") {
            return Ok(json!({ "id": "database-id" }));
        }
        if url == DRIVE_FILES_URL && data["name"] == "content" {
            return Ok(json!({ "id": "content-id" }));
        }
        Ok(json!({ "id": "folder-id" }))
    }
}

/// Runner recording every command. Programs listed in `failing` fail.
#[derive(Default)]
pub struct RecordingRunner {
    pub failing: Vec<String>,
    pub calls: RefCell<Vec<(String, PathBuf)>>,
}

impl RecordingRunner {
    pub fn failing(programs: &[&str]) -> Self {
        Self { failing: programs.iter().map(|p| p.to_string()).collect(), ..Self::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &ToolCommand, cwd: &Path) -> Result<()> {
        self.calls.borrow_mut().push((command.to_string(), cwd.to_path_buf()));
        if self.failing.contains(&command.program) {
            return Err(Error::IoError(std::io::Error::other(format!("{command} failed"))));
        }
        Ok(())
    }
}

/// Prompter with canned answers.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub remote: Option<String>,
    pub backend: Option<String>,
    pub checkpoints: RefCell<Vec<String>>,
}

impl Prompter for ScriptedPrompter {
    fn remote_url(&self) -> Result<Option<String>> {
        Ok(self.remote.clone())
    }

    fn checkpoint(&self, url: &str) -> Result<Option<String>> {
        self.checkpoints.borrow_mut().push(url.to_string());
        Ok(self.backend.clone())
    }
}

pub fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

pub const BACKEND_CONFIG: &str = r#"var SHEETBASE_CONFIG = {
    "apiKey": "<api_key>",
    "encryptionKey": "<encryption_key>",
    "database": "<your_spreadsheet_id>",
    "contentFolder": "<your_folder_id>"
};
// "apiKey": "keep-me"
"#;

pub const FRONTEND_CONFIG: &str = r#"export const SHEETBASE_CONFIG = {
    "apiKey": "<api_key>",
    "database": "<your_spreadsheet_id>",
    "backend": "<your_webapp_id>"
};
"#;

/// Writes a template containing every known artifact.
pub fn full_template(root: &Path) {
    write(root, "package.json", r#"{ "name": "sheetbase-template", "version": "1.0.0" }"#);
    write(
        root,
        "sheetbase.config.json",
        r#"{ "name": "template", "driveFolder": "", "database": "template-db" }"#,
    );
    write(root, "backend/.clasp.json", r#"{ "scriptId": "", "rootDir": "." }"#);
    write(root, "backend/configs/Sheetbase.config.js", BACKEND_CONFIG);
    write(root, "src/configs/sheetbase.config.ts", FRONTEND_CONFIG);
}

pub fn settings() -> Settings {
    Settings::default()
}
