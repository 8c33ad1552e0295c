//! Services - business rules on top of the repository ports.
//!
//! Each service receives its dependencies through `new`; nothing is looked up
//! globally.

use std::sync::Arc;

use crate::ports::{
    CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository, UserRepository,
};

mod comment;
mod discussion;
mod hashtag;
mod like;
mod user;

pub use comment::CommentService;
pub use discussion::{DiscussionService, MAX_HASHTAGS_PER_DISCUSSION};
pub use hashtag::HashtagService;
pub use like::LikeService;
pub use user::UserService;

/// Every service, wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub discussions: DiscussionService,
    pub comments: CommentService,
    pub likes: LikeService,
    pub hashtags: HashtagService,
}

impl Services {
    pub fn new(
        users: Arc<dyn UserRepository>,
        discussions: Arc<dyn DiscussionRepository>,
        comments: Arc<dyn CommentRepository>,
        likes: Arc<dyn LikeRepository>,
        hashtags: Arc<dyn HashtagRepository>,
    ) -> Self {
        let hashtag_service = HashtagService::new(hashtags.clone());
        let discussion_service = DiscussionService::new(
            users.clone(),
            discussions.clone(),
            comments.clone(),
            likes.clone(),
            hashtags,
            hashtag_service.clone(),
        );

        Self {
            users: UserService::new(users.clone()),
            comments: CommentService::new(users.clone(), discussions.clone(), comments),
            likes: LikeService::new(users, discussions, likes),
            discussions: discussion_service,
            hashtags: hashtag_service,
        }
    }
}
