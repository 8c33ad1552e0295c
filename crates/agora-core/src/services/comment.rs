use std::sync::Arc;

use crate::domain::{Comment, NewComment};
use crate::error::{DomainError, DomainResult};
use crate::ports::{CommentRepository, DiscussionRepository, UserRepository};

const ENTITY: &str = "Comment";

#[derive(Clone)]
pub struct CommentService {
    users: Arc<dyn UserRepository>,
    discussions: Arc<dyn DiscussionRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CommentService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            users,
            discussions,
            comments,
        }
    }

    /// Comment on a discussion. Both the author and the discussion must exist.
    pub async fn create(&self, input: NewComment) -> DomainResult<Comment> {
        if self.users.find_by_id(input.user_id).await?.is_none() {
            return Err(DomainError::not_found("User", input.user_id));
        }
        self.ensure_discussion(input.discussion_id).await?;

        let comment = self.comments.create(input).await?;
        tracing::info!(
            comment_id = comment.id,
            discussion_id = comment.discussion_id,
            "Comment created"
        );
        Ok(comment)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Comment> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    pub async fn list(&self) -> DomainResult<Vec<Comment>> {
        Ok(self.comments.find_all().await?)
    }

    pub async fn list_by_discussion(&self, discussion_id: i64) -> DomainResult<Vec<Comment>> {
        self.ensure_discussion(discussion_id).await?;
        Ok(self.comments.find_by_discussion(discussion_id).await?)
    }

    /// Comments written by a user, oldest first.
    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Comment>> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }
        Ok(self.comments.find_by_user(user_id).await?)
    }

    /// Replace the comment text.
    pub async fn update(&self, id: i64, text: String) -> DomainResult<Comment> {
        let mut comment = self.get(id).await?;
        comment.text = text;

        let updated = self
            .comments
            .update(comment)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(comment_id = id, "Comment updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.comments
            .delete(id)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(comment_id = id, "Comment deleted");
        Ok(())
    }

    async fn ensure_discussion(&self, discussion_id: i64) -> DomainResult<()> {
        match self.discussions.find_by_id(discussion_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Discussion", discussion_id)),
        }
    }
}
