use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Like entity. At most one exists per (user, discussion) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub discussion_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLike {
    pub user_id: i64,
    pub discussion_id: i64,
    pub created_at: DateTime<Utc>,
}

impl NewLike {
    pub fn new(user_id: i64, discussion_id: i64) -> Self {
        Self {
            user_id,
            discussion_id,
            created_at: Utc::now(),
        }
    }
}
