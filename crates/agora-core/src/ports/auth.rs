//! Authentication ports.

/// The caller a set of credentials belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
}

/// Checks a username/password pair against a credential source.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Result<Principal, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Malformed authorization header: {0}")]
    MalformedHeader(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
