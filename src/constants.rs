//! Common constants used throughout the Sheetbase project generator.

/// Default GitHub organisation hosting the official templates.
pub const DEFAULT_ORG: &str = "316Company";

/// Prefix of the official template repositories.
pub const TEMPLATE_PREFIX: &str = "sheetbase-";

/// Artifact paths, relative to the project root.
pub mod artifacts {
    pub const PACKAGE_JSON: &str = "package.json";
    pub const SHEETBASE_CONFIG: &str = "sheetbase.config.json";
    pub const CLASP_JSON: &str = "backend/.clasp.json";
    pub const BACKEND_CONFIG: &str = "backend/configs/Sheetbase.config.js";
    pub const FRONTEND_CONFIG: &str = "src/configs/sheetbase.config.ts";
}

/// Values written in place of resource ids that are unavailable.
pub mod placeholders {
    pub const SCRIPT_ID: &str = "<scriptId>";
    pub const SPREADSHEET_ID: &str = "<your_spreadsheet_id>";
    pub const FOLDER_ID: &str = "<your_folder_id>";
    pub const WEBAPP_ID: &str = "<your_webapp_id>";
}

/// Length of the generated api key.
pub const API_KEY_LENGTH: usize = 32;

/// Length of the generated encryption key.
pub const ENCRYPTION_KEY_LENGTH: usize = 12;

/// Alphabet of the generated encryption key.
pub const ENCRYPTION_KEY_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_!@#$%&*";

pub const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
pub const SCRIPT_PROJECTS_URL: &str = "https://script.googleapis.com/v1/projects";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Environment variable holding an OAuth access token.
pub const ACCESS_TOKEN_ENV: &str = "SHEETBASE_ACCESS_TOKEN";

/// Credentials file written by `sheetbase login`, relative to $HOME.
pub const CREDENTIALS_FILE: &str = ".sheetbase/credentials.json";

/// Files and directories never copied from a local template.
pub const TEMPLATE_IGNORE: [&str; 3] = ["**/.git", "**/node_modules", "**/.DS_Store"];

pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit";
pub const BACKEND_COMMIT_MESSAGE: &str = "Update backend";
pub const REMOTE_NAME: &str = "origin";
