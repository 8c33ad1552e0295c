//! SeaORM entities, one module per table.

pub mod comment;
pub mod discussion;
pub mod discussion_hashtag;
pub mod hashtag;
pub mod like;
pub mod user;
