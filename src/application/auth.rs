//! Auth service: Session flag over a pluggable credential check.
//!
//! One operator, one boolean session flag. Credentials are checked by the
//! injected verifier; a rejection mutates nothing beyond the flag staying
//! down.

use crate::ports::CredentialVerifier;

/// Service owning the operator session state.
pub struct AuthService<V>
where
    V: CredentialVerifier,
{
    verifier: V,
    authenticated: bool,
}

impl<V> AuthService<V>
where
    V: CredentialVerifier,
{
    pub fn new(verifier: V) -> Self {
        Self {
            verifier,
            authenticated: false,
        }
    }

    /// Attempt a login. Grants the session flag only on exact match.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        self.authenticated = self.verifier.verify(username, password);

        if self.authenticated {
            tracing::info!("operator logged in");
        } else {
            // Never log the submitted pair.
            tracing::warn!("rejected login attempt");
        }

        self.authenticated
    }

    /// Drop the session flag.
    pub fn logout(&mut self) {
        if self.authenticated {
            tracing::info!("operator logged out");
        }
        self.authenticated = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
