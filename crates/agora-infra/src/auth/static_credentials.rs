//! Static username/password credentials.
//!
//! Passwords are held and compared in clear text. This is a placeholder
//! policy, not production security.

use std::collections::HashMap;

use agora_core::ports::{AuthError, CredentialVerifier, Principal};

/// Immutable credential map, built once at start-up.
pub struct StaticCredentialStore {
    credentials: HashMap<String, String>,
}

impl StaticCredentialStore {
    pub fn new(credentials: HashMap<String, String>) -> Self {
        Self { credentials }
    }

    /// Number of configured accounts.
    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

impl CredentialVerifier for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        match self.credentials.get(username) {
            Some(expected) if expected == password => Ok(Principal {
                username: username.to_string(),
            }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }
}
