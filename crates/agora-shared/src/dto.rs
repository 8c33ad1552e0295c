//! Data Transfer Objects - request/response types for the API.
//!
//! Every type serializes with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use agora_core::domain::{
    Comment, Discussion, DiscussionDetail, DiscussionUpdate, Hashtag, Like, NewComment,
    NewDiscussion, NewLike, NewUser, User,
};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body of `POST /api/users` and `PUT /api/users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub mobile_no: String,
    #[validate(email)]
    pub email: String,
}

impl From<UserRequest> for NewUser {
    fn from(req: UserRequest) -> Self {
        NewUser::new(req.name, req.mobile_no, req.email)
    }
}

/// Body of `POST /api/discussions`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionRequest {
    pub user_id: i64,
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,
    #[validate(length(max = 20))]
    pub hashtags: Option<Vec<String>>,
}

impl DiscussionRequest {
    /// Split into the discussion to store and the raw hashtag names.
    pub fn into_parts(self) -> (NewDiscussion, Vec<String>) {
        (
            NewDiscussion::new(self.user_id, self.text, self.image_url),
            self.hashtags.unwrap_or_default(),
        )
    }
}

/// Body of `PUT /api/discussions/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscussionRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    #[validate(length(min = 1, max = 2048))]
    pub image_url: Option<String>,
}

impl From<UpdateDiscussionRequest> for DiscussionUpdate {
    fn from(req: UpdateDiscussionRequest) -> Self {
        DiscussionUpdate {
            text: req.text,
            image_url: req.image_url,
        }
    }
}

/// Body of `POST /api/comments`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub user_id: i64,
    pub discussion_id: i64,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

impl From<CommentRequest> for NewComment {
    fn from(req: CommentRequest) -> Self {
        NewComment::new(req.user_id, req.discussion_id, req.text)
    }
}

/// Body of `PUT /api/comments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

/// Body of `POST /api/likes`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub user_id: i64,
    pub discussion_id: i64,
}

impl From<LikeRequest> for NewLike {
    fn from(req: LikeRequest) -> Self {
        NewLike::new(req.user_id, req.discussion_id)
    }
}

/// Body of the hashtag routes. Normalisation happens in the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HashtagRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Query string of `GET /api/users/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub mobile_no: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            mobile_no: user.mobile_no,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionResponse {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Discussion> for DiscussionResponse {
    fn from(d: Discussion) -> Self {
        Self {
            id: d.id,
            user_id: d.user_id,
            text: d.text,
            image_url: d.image_url,
            created_at: d.created_at,
        }
    }
}

/// A discussion with its hashtags and engagement counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDetailResponse {
    #[serde(flatten)]
    pub discussion: DiscussionResponse,
    pub hashtags: Vec<HashtagResponse>,
    pub comment_count: u64,
    pub like_count: u64,
}

impl From<DiscussionDetail> for DiscussionDetailResponse {
    fn from(detail: DiscussionDetail) -> Self {
        Self {
            discussion: detail.discussion.into(),
            hashtags: detail.hashtags.into_iter().map(Into::into).collect(),
            comment_count: detail.comment_count,
            like_count: detail.like_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: i64,
    pub discussion_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            user_id: c.user_id,
            discussion_id: c.discussion_id,
            text: c.text,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: i64,
    pub user_id: i64,
    pub discussion_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeResponse {
    fn from(l: Like) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            discussion_id: l.discussion_id,
            created_at: l.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashtagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Hashtag> for HashtagResponse {
    fn from(h: Hashtag) -> Self {
        Self {
            id: h.id,
            name: h.name,
        }
    }
}
