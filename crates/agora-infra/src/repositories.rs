//! The set of repositories a process runs with.

use std::sync::Arc;

use agora_core::ports::{
    CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository, UserRepository,
};
use agora_core::services::Services;

use crate::database::{
    InMemoryCommentRepository, InMemoryDiscussionRepository, InMemoryHashtagRepository,
    InMemoryLikeRepository, InMemoryStore, InMemoryUserRepository,
};

/// One repository per entity, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub discussions: Arc<dyn DiscussionRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub hashtags: Arc<dyn HashtagRepository>,
}

impl Repositories {
    /// Repositories sharing a fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: Arc::new(InMemoryUserRepository::new(store.clone())),
            discussions: Arc::new(InMemoryDiscussionRepository::new(store.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(store.clone())),
            likes: Arc::new(InMemoryLikeRepository::new(store.clone())),
            hashtags: Arc::new(InMemoryHashtagRepository::new(store)),
        }
    }

    /// Repositories over one PostgreSQL connection pool.
    #[cfg(feature = "postgres")]
    pub fn postgres(db: sea_orm::DbConn) -> Self {
        use crate::database::{
            PostgresCommentRepository, PostgresDiscussionRepository, PostgresHashtagRepository,
            PostgresLikeRepository, PostgresUserRepository,
        };

        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            discussions: Arc::new(PostgresDiscussionRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            likes: Arc::new(PostgresLikeRepository::new(db.clone())),
            hashtags: Arc::new(PostgresHashtagRepository::new(db)),
        }
    }

    /// Compose the service layer over these repositories.
    pub fn into_services(self) -> Services {
        Services::new(
            self.users,
            self.discussions,
            self.comments,
            self.likes,
            self.hashtags,
        )
    }
}
