//! Static credentials adapter: Single hardcoded operator pair.
//!
//! This is the insecure-by-design default the portal ships with; it lives
//! behind the `CredentialVerifier` port so it can be swapped without
//! touching the session logic.

use crate::ports::CredentialVerifier;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin123";

/// A single username/password pair checked by exact match.
///
/// No hashing, no rate limiting, no expiry.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read the pair from `CHURNSCOPE_USERNAME` / `CHURNSCOPE_PASSWORD`,
    /// falling back to the built-in default for each missing variable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            username: std::env::var("CHURNSCOPE_USERNAME")
                .unwrap_or_else(|_| DEFAULT_USERNAME.to_string()),
            password: std::env::var("CHURNSCOPE_PASSWORD")
                .unwrap_or_else(|_| DEFAULT_PASSWORD.to_string()),
        }
    }
}

impl Default for StaticCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME, DEFAULT_PASSWORD)
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}
