//! Persistence: SeaORM-backed PostgreSQL repositories and an in-memory store.

pub mod memory;

mod connections;
#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use memory::{
    InMemoryCommentRepository, InMemoryDiscussionRepository, InMemoryHashtagRepository,
    InMemoryLikeRepository, InMemoryStore, InMemoryUserRepository,
};

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::connect;

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresCommentRepository, PostgresDiscussionRepository, PostgresHashtagRepository,
    PostgresLikeRepository, PostgresUserRepository,
};
