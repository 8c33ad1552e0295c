//! Domain-level error types.

use thiserror::Error;

use crate::ports::AuthError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate {entity}: {message}")]
    Duplicate {
        entity: &'static str,
        message: String,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepoError),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Attribute a repository failure to one record.
    ///
    /// A `RepoError::NotFound` becomes `DomainError::NotFound` for that record,
    /// anything else is passed through.
    pub fn from_repo(err: RepoError, entity: &'static str, id: i64) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound { entity, id },
            other => Self::Repository(other),
        }
    }
}

/// Result alias for service operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
