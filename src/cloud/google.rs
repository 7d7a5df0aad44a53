use crate::cloud::{AuthenticatedClient, Method};
use crate::constants::{ACCESS_TOKEN_ENV, CREDENTIALS_FILE};
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct Credentials {
    access_token: String,
}

/// Google API client authenticated with an OAuth bearer token.
pub struct GoogleClient {
    http: reqwest::blocking::Client,
    access_token: String,
}

impl GoogleClient {
    pub fn new(access_token: String) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { http, access_token })
    }

    /// Looks up a token in the environment, then in the credentials file.
    ///
    /// Returns `None` when the user is not logged in; that is not an error.
    pub fn from_environment() -> Option<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| credentials_path().and_then(|p| read_access_token(&p)))?;

        match Self::new(token) {
            Ok(client) => Some(client),
            Err(e) => {
                debug!("Unable to build HTTP client: {e}");
                None
            }
        }
    }
}

fn credentials_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| PathBuf::from(home).join(CREDENTIALS_FILE))
}

/// Reads the access token from a credentials file, if it holds one.
pub fn read_access_token(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<Credentials>(&raw) {
        Ok(credentials) if !credentials.access_token.is_empty() => Some(credentials.access_token),
        Ok(_) => None,
        Err(e) => {
            debug!("Ignoring malformed credentials file '{}': {e}", path.display());
            None
        }
    }
}

impl AuthenticatedClient for GoogleClient {
    fn request(
        &self,
        method: Method,
        url: &str,
        data: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        debug!("{method} {url}");
        let response = self
            .http
            .request(method, url)
            .bearer_auth(&self.access_token)
            .json(data)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ProvisionError(format!("HTTP {status}: {url}")));
        }

        Ok(response.json()?)
    }
}
