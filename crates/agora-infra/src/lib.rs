//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//! This crate contains the storage backends and the credential store.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL database support via SeaORM

pub mod auth;
pub mod database;
pub mod repositories;

// Re-exports
pub use auth::{StaticCredentialStore, parse_basic_header};
pub use database::{DatabaseConfig, InMemoryStore};
pub use repositories::Repositories;
