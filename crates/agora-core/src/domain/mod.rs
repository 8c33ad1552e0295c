//! Domain entities - the core business objects.

mod comment;
mod discussion;
mod hashtag;
mod like;
mod user;

pub use comment::{Comment, NewComment};
pub use discussion::{Discussion, DiscussionDetail, DiscussionUpdate, NewDiscussion};
pub use hashtag::{Hashtag, MAX_HASHTAG_LEN, NewHashtag};
pub use like::{Like, NewLike};
pub use user::{NewUser, User};
