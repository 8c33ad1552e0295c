//! # Agora Core
//!
//! The domain layer of the Agora discussion backend.
//! This crate contains entities, repository ports and the services that
//! enforce business rules. It has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, DomainResult, RepoError};
