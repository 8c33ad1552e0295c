use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity - a reply by a user on a discussion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub discussion_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub discussion_id: i64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn new(user_id: i64, discussion_id: i64, text: String) -> Self {
        Self {
            user_id,
            discussion_id,
            text,
            created_at: Utc::now(),
        }
    }
}
