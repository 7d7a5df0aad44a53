//! Run-scoped random credentials written into the generated configuration.

use crate::constants::{API_KEY_LENGTH, ENCRYPTION_KEY_CHARSET, ENCRYPTION_KEY_LENGTH};
use rand::distr::{Alphanumeric, SampleString};
use rand::Rng;

/// Secrets generated once per run. Fields are private so the bundle cannot
/// change after creation.
#[derive(Debug, Clone)]
pub struct SecretBundle {
    api_key: String,
    encryption_key: String,
}

impl SecretBundle {
    /// Generates a fresh api key and encryption key.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let api_key = Alphanumeric.sample_string(&mut rng, API_KEY_LENGTH);
        let encryption_key = (0..ENCRYPTION_KEY_LENGTH)
            .map(|_| {
                ENCRYPTION_KEY_CHARSET[rng.random_range(0..ENCRYPTION_KEY_CHARSET.len())] as char
            })
            .collect();

        Self { api_key, encryption_key }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn encryption_key(&self) -> &str {
        &self.encryption_key
    }
}
