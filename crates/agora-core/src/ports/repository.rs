use async_trait::async_trait;

use crate::domain::{
    Comment, Discussion, Hashtag, Like, NewComment, NewDiscussion, NewHashtag, NewLike, NewUser,
    User,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
///
/// `T` is the stored record, `N` the not-yet-stored form the store assigns an
/// identity to, `ID` the identity type.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Insert a record and return it with its assigned ID.
    async fn create(&self, new: N) -> Result<T, RepoError>;

    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// All entities, ordered by ascending ID.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Overwrite a stored entity. Fails with `RepoError::NotFound` if its ID is unknown.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if nothing was deleted.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, i64> {
    /// Users whose name contains `fragment`, ignoring case.
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<User>, RepoError>;

    /// Delete a user with its discussions, comments and likes, and every
    /// comment, like and hashtag link on those discussions. All or nothing.
    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError>;
}

/// Discussion repository.
#[async_trait]
pub trait DiscussionRepository: BaseRepository<Discussion, NewDiscussion, i64> {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Discussion>, RepoError>;

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, RepoError>;

    /// Insert a discussion linked to `tags`, creating hashtags that do not
    /// exist yet. All or nothing.
    async fn create_tagged(
        &self,
        new: NewDiscussion,
        tags: Vec<NewHashtag>,
    ) -> Result<Discussion, RepoError>;

    /// Delete a discussion with its comments, likes and hashtag links.
    /// All or nothing. Fails with `RepoError::NotFound` if the ID is unknown.
    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, NewComment, i64> {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Comment>, RepoError>;

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Comment>, RepoError>;

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError>;
}

/// Like repository.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, NewLike, i64> {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Like>, RepoError>;

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Like>, RepoError>;

    async fn find_by_user_and_discussion(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<Option<Like>, RepoError>;

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError>;
}

/// Hashtag repository, including the discussion association table.
#[async_trait]
pub trait HashtagRepository: BaseRepository<Hashtag, NewHashtag, i64> {
    /// Exact lookup by normalised name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Hashtag>, RepoError>;

    /// Link a discussion to the hashtag named by `tag`, creating the hashtag
    /// if needed. Linking twice is not an error.
    async fn tag(&self, discussion_id: i64, tag: NewHashtag) -> Result<Hashtag, RepoError>;

    /// Remove one link. Returns whether a link existed.
    async fn detach(&self, discussion_id: i64, hashtag_id: i64) -> Result<bool, RepoError>;

    /// Hashtags linked to a discussion, ordered by name.
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Hashtag>, RepoError>;

    /// IDs of discussions linked to a hashtag, ascending.
    async fn discussion_ids(&self, hashtag_id: i64) -> Result<Vec<i64>, RepoError>;

    /// Delete a hashtag and all of its links. All or nothing.
    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError>;
}
