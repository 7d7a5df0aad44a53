//! Best-effort creation of the project's Drive and Apps Script resources.
//!
//! Every sub-step is attempted independently and its outcome recorded; a
//! failure is logged as a warning and never stops the run.

use crate::cloud::{AuthenticatedClient, Method};
use crate::constants::{DRIVE_FILES_URL, FOLDER_MIME_TYPE, SCRIPT_PROJECTS_URL};
use crate::error::{Error, Result};
use log::{debug, warn};
use serde_json::json;

/// Outcome of creating a single cloud resource.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Provisioned {
    Created(String),
    /// Not attempted: no client, no template dataset, or no parent folder.
    #[default]
    Skipped,
    Failed(String),
}

impl Provisioned {
    /// The resource id, if it was created.
    pub fn id(&self) -> Option<&str> {
        match self {
            Provisioned::Created(id) => Some(id),
            _ => None,
        }
    }

    /// The resource id, or `placeholder` when it is unavailable.
    pub fn id_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.id().unwrap_or(placeholder)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Provisioned::Failed(_))
    }
}

/// Identifiers of the resources provisioned for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceSet {
    pub project_folder: Provisioned,
    pub content_folder: Provisioned,
    pub database: Provisioned,
    pub backend_script: Provisioned,
}

impl ResourceSet {
    pub fn project_folder_id(&self) -> Option<&str> {
        self.project_folder.id()
    }

    pub fn content_folder_id(&self) -> Option<&str> {
        self.content_folder.id()
    }

    pub fn database_id(&self) -> Option<&str> {
        self.database.id()
    }

    pub fn backend_script_id(&self) -> Option<&str> {
        self.backend_script.id()
    }

    /// True if at least one sub-step failed.
    pub fn has_failures(&self) -> bool {
        [&self.project_folder, &self.content_folder, &self.database, &self.backend_script]
            .iter()
            .any(|p| p.is_failed())
    }
}

/// Uppercases the first character, as used in resource titles.
pub fn display_name(project_name: &str) -> String {
    let mut chars = project_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn create(
    client: &dyn AuthenticatedClient,
    url: &str,
    data: serde_json::Value,
    id_field: &str,
) -> Provisioned {
    match request_id(client, url, &data, id_field) {
        Ok(id) => {
            debug!("Created resource {id} via {url}");
            Provisioned::Created(id)
        }
        Err(e) => Provisioned::Failed(e.to_string()),
    }
}

fn request_id(
    client: &dyn AuthenticatedClient,
    url: &str,
    data: &serde_json::Value,
    id_field: &str,
) -> Result<String> {
    let response = client.request(Method::POST, url, data)?;
    response
        .get(id_field)
        .and_then(|id| id.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::ProvisionError(format!("response without '{id_field}'")))
}

/// Creates the project folder, its `content` sub-folder, a copy of the
/// template dataset and the backend script project.
///
/// Without a client an empty [`ResourceSet`] is returned. Resources nested
/// under the project folder are skipped when the folder itself could not be
/// created.
pub fn provision(
    client: Option<&dyn AuthenticatedClient>,
    project_name: &str,
    template_database: Option<&str>,
) -> ResourceSet {
    let Some(client) = client else {
        debug!("No authenticated client, skipping cloud provisioning");
        return ResourceSet::default();
    };

    let name = display_name(project_name);
    let mut resources = ResourceSet {
        project_folder: create(
            client,
            DRIVE_FILES_URL,
            json!({ "name": format!("Sheetbase Project: {name}"), "mimeType": FOLDER_MIME_TYPE }),
            "id",
        ),
        ..ResourceSet::default()
    };

    if let Some(folder) = resources.project_folder.id().map(str::to_string) {
        resources.content_folder = create(
            client,
            DRIVE_FILES_URL,
            json!({ "name": "content", "mimeType": FOLDER_MIME_TYPE, "parents": [folder] }),
            "id",
        );

        if let Some(database) = template_database.filter(|id| !id.is_empty()) {
            resources.database = create(
                client,
                &format!("{DRIVE_FILES_URL}/{database}/copy"),
                json!({ "name": format!("{name} Database"), "parents": [folder] }),
                "id",
            );
        }

        resources.backend_script = create(
            client,
            SCRIPT_PROJECTS_URL,
            json!({ "title": format!("{name} Backend"), "parentId": folder }),
            "scriptId",
        );
    }

    if resources.has_failures() {
        for failure in [
            &resources.project_folder,
            &resources.content_folder,
            &resources.database,
            &resources.backend_script,
        ] {
            if let Provisioned::Failed(reason) = failure {
                debug!("Provisioning failure: {reason}");
            }
        }
        warn!("(!) Error setting up one or more Drive files, please set them up manually!");
    }

    resources
}
