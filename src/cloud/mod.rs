//! Cloud collaborators: the authenticated client capability and the
//! best-effort resource provisioner built on top of it.

use crate::error::Result;

pub mod google;
pub mod provisioner;

pub use google::GoogleClient;
pub use provisioner::{provision, Provisioned, ResourceSet};
pub use reqwest::Method;

/// Capability to issue authenticated API requests.
///
/// Obtained once per run and handed explicitly to the stages that need it.
pub trait AuthenticatedClient {
    /// Sends `data` as a JSON body and returns the decoded JSON response.
    fn request(&self, method: Method, url: &str, data: &serde_json::Value)
        -> Result<serde_json::Value>;
}
