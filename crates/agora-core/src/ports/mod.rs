//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod repository;

pub use auth::{AuthError, CredentialVerifier, Principal};
pub use repository::{
    BaseRepository, CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository,
    UserRepository,
};
