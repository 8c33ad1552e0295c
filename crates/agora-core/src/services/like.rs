use std::sync::Arc;

use crate::domain::{Like, NewLike};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::{DiscussionRepository, LikeRepository, UserRepository};

const ENTITY: &str = "Like";

/// Likes. A user can like a discussion once.
#[derive(Clone)]
pub struct LikeService {
    users: Arc<dyn UserRepository>,
    discussions: Arc<dyn DiscussionRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            users,
            discussions,
            likes,
        }
    }

    /// Record a like. A second like for the same (user, discussion) pair is a
    /// `Duplicate` error, whether caught here or by the store's unique index.
    pub async fn create(&self, input: NewLike) -> DomainResult<Like> {
        let (user_id, discussion_id) = (input.user_id, input.discussion_id);

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }
        self.ensure_discussion(discussion_id).await?;

        if self
            .likes
            .find_by_user_and_discussion(user_id, discussion_id)
            .await?
            .is_some()
        {
            return Err(duplicate(user_id, discussion_id));
        }

        let like = self.likes.create(input).await.map_err(|e| match e {
            RepoError::Constraint(_) => duplicate(user_id, discussion_id),
            other => other.into(),
        })?;
        tracing::info!(like_id = like.id, user_id, discussion_id, "Like created");
        Ok(like)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Like> {
        self.likes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Like>> {
        Ok(self.likes.find_all().await?)
    }

    pub async fn list_by_discussion(&self, discussion_id: i64) -> DomainResult<Vec<Like>> {
        self.ensure_discussion(discussion_id).await?;
        Ok(self.likes.find_by_discussion(discussion_id).await?)
    }

    /// Likes given by a user, oldest first.
    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Like>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }
        Ok(self.likes.find_by_user(user_id).await?)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.likes
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(like_id = id, "Like deleted");
        Ok(())
    }

    async fn ensure_discussion(&self, discussion_id: i64) -> DomainResult<()> {
        match self.discussions.find_by_id(discussion_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Discussion", discussion_id)),
        }
    }
}

fn duplicate(user_id: i64, discussion_id: i64) -> DomainError {
    DomainError::Duplicate {
        entity: ENTITY,
        message: format!("User {user_id} already likes discussion {discussion_id}"),
    }
}
