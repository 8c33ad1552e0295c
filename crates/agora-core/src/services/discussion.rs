use std::sync::Arc;

use crate::domain::{
    Discussion, DiscussionDetail, DiscussionUpdate, Hashtag, NewDiscussion, NewHashtag,
};
use crate::error::{DomainError, DomainResult, RepoError};
use crate::ports::{
    CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository, UserRepository,
};

use super::HashtagService;

const ENTITY: &str = "Discussion";

/// Most hashtags accepted on one discussion at creation.
pub const MAX_HASHTAGS_PER_DISCUSSION: usize = 20;

/// Discussions, their hashtag links and their aggregate counts.
#[derive(Clone)]
pub struct DiscussionService {
    users: Arc<dyn UserRepository>,
    discussions: Arc<dyn DiscussionRepository>,
    comments: Arc<dyn CommentRepository>,
    likes: Arc<dyn LikeRepository>,
    hashtag_links: Arc<dyn HashtagRepository>,
    hashtags: HashtagService,
}

impl DiscussionService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
        hashtag_links: Arc<dyn HashtagRepository>,
        hashtags: HashtagService,
    ) -> Self {
        Self {
            users,
            discussions,
            comments,
            likes,
            hashtag_links,
            hashtags,
        }
    }

    /// Create a discussion for an existing user and tag it.
    ///
    /// Hashtag names are validated before anything is written.
    pub async fn create(
        &self,
        input: NewDiscussion,
        hashtag_names: &[String],
    ) -> DomainResult<DiscussionDetail> {
        if hashtag_names.len() > MAX_HASHTAGS_PER_DISCUSSION {
            return Err(DomainError::Validation(format!(
                "A discussion may carry at most {MAX_HASHTAGS_PER_DISCUSSION} hashtags"
            )));
        }
        let mut tags = hashtag_names
            .iter()
            .map(|name| NewHashtag::parse(name))
            .collect::<Result<Vec<_>, _>>()?;
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags.dedup();

        self.ensure_user(input.user_id).await?;

        let user_id = input.user_id;
        let discussion = self
            .discussions
            .create_tagged(input, tags)
            .await
            .map_err(|e| match e {
                // The author went away after the lookup above.
                RepoError::Constraint(_) => DomainError::not_found("User", user_id),
                other => other.into(),
            })?;

        tracing::info!(
            discussion_id = discussion.id,
            user_id = discussion.user_id,
            "Discussion created"
        );
        self.detail(discussion).await
    }

    pub async fn get(&self, id: i64) -> DomainResult<Discussion> {
        self.discussions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))
    }

    /// The discussion with its hashtags, comment count and like count.
    pub async fn get_detail(&self, id: i64) -> DomainResult<DiscussionDetail> {
        let discussion = self.get(id).await?;
        self.detail(discussion).await
    }

    pub async fn list(&self) -> DomainResult<Vec<Discussion>> {
        Ok(self.discussions.find_all().await?)
    }

    pub async fn list_by_user(&self, user_id: i64) -> DomainResult<Vec<Discussion>> {
        self.ensure_user(user_id).await?;
        Ok(self.discussions.find_by_user(user_id).await?)
    }

    pub async fn list_by_hashtag(&self, hashtag_id: i64) -> DomainResult<Vec<Discussion>> {
        self.hashtags.get(hashtag_id).await?;
        let ids = self.hashtag_links.discussion_ids(hashtag_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.discussions.find_by_ids(&ids).await?)
    }

    /// Overwrite text and image reference.
    pub async fn update(&self, id: i64, changes: DiscussionUpdate) -> DomainResult<Discussion> {
        let mut discussion = self.get(id).await?;
        discussion.text = changes.text;
        discussion.image_url = changes.image_url;

        let updated = self
            .discussions
            .update(discussion)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(discussion_id = id, "Discussion updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.discussions
            .delete_cascade(id)
            .await
            .map_err(|e| DomainError::from_repo(e, ENTITY, id))?;
        tracing::info!(discussion_id = id, "Discussion deleted");
        Ok(())
    }

    /// Tag a discussion, creating the hashtag if it does not exist yet.
    pub async fn add_hashtag(&self, id: i64, name: &str) -> DomainResult<DiscussionDetail> {
        let tag = NewHashtag::parse(name)?;
        let discussion = self.get(id).await?;
        let hashtag = self
            .hashtag_links
            .tag(id, tag)
            .await
            .map_err(|e| match e {
                // The discussion went away after the lookup above.
                RepoError::Constraint(_) => DomainError::not_found(ENTITY, id),
                other => other.into(),
            })?;

        tracing::info!(discussion_id = id, hashtag_id = hashtag.id, "Hashtag attached");
        self.detail(discussion).await
    }

    pub async fn remove_hashtag(&self, id: i64, hashtag_id: i64) -> DomainResult<()> {
        self.get(id).await?;
        self.hashtags.get(hashtag_id).await?;

        if !self.hashtag_links.detach(id, hashtag_id).await? {
            return Err(DomainError::not_found("Hashtag", hashtag_id));
        }
        tracing::info!(discussion_id = id, hashtag_id, "Hashtag detached");
        Ok(())
    }

    async fn detail(&self, discussion: Discussion) -> DomainResult<DiscussionDetail> {
        let hashtags: Vec<Hashtag> = self.hashtag_links.find_by_discussion(discussion.id).await?;
        let comment_count = self.comments.count_by_discussion(discussion.id).await?;
        let like_count = self.likes.count_by_discussion(discussion.id).await?;

        Ok(DiscussionDetail {
            discussion,
            hashtags,
            comment_count,
            like_count,
        })
    }

    async fn ensure_user(&self, user_id: i64) -> DomainResult<()> {
        match self.users.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("User", user_id)),
        }
    }
}
