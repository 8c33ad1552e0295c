use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Hashtag;

/// Discussion entity - a post started by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub id: i64,
    pub user_id: i64,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A discussion that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewDiscussion {
    pub user_id: i64,
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewDiscussion {
    /// Create a new discussion stamped with the current time.
    pub fn new(user_id: i64, text: String, image_url: Option<String>) -> Self {
        Self {
            user_id,
            text,
            image_url,
            created_at: Utc::now(),
        }
    }
}

/// Mutable fields of a discussion.
#[derive(Debug, Clone)]
pub struct DiscussionUpdate {
    pub text: String,
    pub image_url: Option<String>,
}

/// A discussion together with its hashtags and engagement counts.
#[derive(Debug, Clone)]
pub struct DiscussionDetail {
    pub discussion: Discussion,
    pub hashtags: Vec<Hashtag>,
    pub comment_count: u64,
    pub like_count: u64,
}
