//! In-memory repositories - used when no database is configured.
//!
//! All tables live behind one async `RwLock`, so every repository call is
//! atomic. Unique and foreign-key constraints mirror the PostgreSQL schema.
//! Note: Data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use agora_core::domain::{
    Comment, Discussion, Hashtag, Like, NewComment, NewDiscussion, NewHashtag, NewLike, NewUser,
    User,
};
use agora_core::error::RepoError;
use agora_core::ports::{
    BaseRepository, CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository,
    UserRepository,
};

/// A stored row type.
trait Record: Clone {
    type New;

    fn id(&self) -> i64;

    fn assemble(id: i64, new: Self::New) -> Self;

    /// Whether two distinct rows violate a unique constraint.
    fn conflicts(&self, _other: &Self) -> bool {
        false
    }

    /// `(user_id, discussion_id)` this row points at, if any.
    fn references(&self) -> (Option<i64>, Option<i64>) {
        (None, None)
    }
}

impl Record for User {
    type New = NewUser;

    fn id(&self) -> i64 {
        self.id
    }

    fn assemble(id: i64, new: NewUser) -> Self {
        Self {
            id,
            name: new.name,
            mobile_no: new.mobile_no,
            email: new.email,
        }
    }
}

impl Record for Discussion {
    type New = NewDiscussion;

    fn id(&self) -> i64 {
        self.id
    }

    fn assemble(id: i64, new: NewDiscussion) -> Self {
        Self {
            id,
            user_id: new.user_id,
            text: new.text,
            image_url: new.image_url,
            created_at: new.created_at,
        }
    }

    fn references(&self) -> (Option<i64>, Option<i64>) {
        (Some(self.user_id), None)
    }
}

impl Record for Comment {
    type New = NewComment;

    fn id(&self) -> i64 {
        self.id
    }

    fn assemble(id: i64, new: NewComment) -> Self {
        Self {
            id,
            user_id: new.user_id,
            discussion_id: new.discussion_id,
            text: new.text,
            created_at: new.created_at,
        }
    }

    fn references(&self) -> (Option<i64>, Option<i64>) {
        (Some(self.user_id), Some(self.discussion_id))
    }
}

impl Record for Like {
    type New = NewLike;

    fn id(&self) -> i64 {
        self.id
    }

    fn assemble(id: i64, new: NewLike) -> Self {
        Self {
            id,
            user_id: new.user_id,
            discussion_id: new.discussion_id,
            created_at: new.created_at,
        }
    }

    fn conflicts(&self, other: &Self) -> bool {
        self.user_id == other.user_id && self.discussion_id == other.discussion_id
    }

    fn references(&self) -> (Option<i64>, Option<i64>) {
        (Some(self.user_id), Some(self.discussion_id))
    }
}

impl Record for Hashtag {
    type New = NewHashtag;

    fn id(&self) -> i64 {
        self.id
    }

    fn assemble(id: i64, new: NewHashtag) -> Self {
        Self { id, name: new.name }
    }

    fn conflicts(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> Table<T> {
    fn insert(&mut self, new: T::New) -> Result<T, RepoError> {
        let row = self.stage(new);
        self.commit(row)
    }

    /// The row `new` would become, not stored yet.
    fn stage(&self, new: T::New) -> T {
        T::assemble(self.next_id, new)
    }

    fn commit(&mut self, row: T) -> Result<T, RepoError> {
        self.check_unique(&row)?;

        self.next_id += 1;
        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| pred(row)).cloned().collect()
    }

    fn replace(&mut self, row: T) -> Result<T, RepoError> {
        if !self.rows.contains_key(&row.id()) {
            return Err(RepoError::NotFound);
        }
        self.check_unique(&row)?;

        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn remove(&mut self, id: i64) -> Result<(), RepoError> {
        self.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    fn remove_where(&mut self, pred: impl Fn(&T) -> bool) {
        self.rows.retain(|_, row| !pred(row));
    }

    fn check_unique(&self, row: &T) -> Result<(), RepoError> {
        let clash = self
            .rows
            .values()
            .any(|other| other.id() != row.id() && other.conflicts(row));
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    discussions: Table<Discussion>,
    comments: Table<Comment>,
    likes: Table<Like>,
    hashtags: Table<Hashtag>,
    /// `(discussion_id, hashtag_id)` pairs.
    links: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn check_references<T: Record>(&self, row: &T) -> Result<(), RepoError> {
        let (user_id, discussion_id) = row.references();
        if let Some(id) = user_id.filter(|id| !self.users.contains(*id)) {
            return Err(RepoError::Constraint(format!("User {id} does not exist")));
        }
        if let Some(id) = discussion_id.filter(|id| !self.discussions.contains(*id)) {
            return Err(RepoError::Constraint(format!(
                "Discussion {id} does not exist"
            )));
        }
        Ok(())
    }

    fn purge_discussion(&mut self, id: i64) -> Result<(), RepoError> {
        if !self.discussions.contains(id) {
            return Err(RepoError::NotFound);
        }
        self.comments.remove_where(|c| c.discussion_id == id);
        self.likes.remove_where(|l| l.discussion_id == id);
        self.links.retain(|(d, _)| *d != id);
        self.discussions.remove(id)
    }

    /// Find or create the hashtag, then link it.
    fn tag(&mut self, discussion_id: i64, tag: NewHashtag) -> Result<Hashtag, RepoError> {
        if !self.discussions.contains(discussion_id) {
            return Err(RepoError::Constraint(format!(
                "Discussion {discussion_id} does not exist"
            )));
        }

        let existing = self.hashtags.filter(|h| h.name == tag.name).into_iter().next();
        let hashtag = match existing {
            Some(hashtag) => hashtag,
            None => self.hashtags.insert(tag)?,
        };
        self.links.insert((discussion_id, hashtag.id));
        Ok(hashtag)
    }
}

/// Shared storage behind the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository.
pub struct InMemoryUserRepository {
    store: Arc<InMemoryStore>,
}

/// In-memory discussion repository.
pub struct InMemoryDiscussionRepository {
    store: Arc<InMemoryStore>,
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    store: Arc<InMemoryStore>,
}

/// In-memory like repository.
pub struct InMemoryLikeRepository {
    store: Arc<InMemoryStore>,
}

/// In-memory hashtag repository, also owning the discussion links.
pub struct InMemoryHashtagRepository {
    store: Arc<InMemoryStore>,
}

macro_rules! in_memory_repository {
    ($repo:ident, $record:ty, $new:ty, $table:ident) => {
        impl $repo {
            pub fn new(store: Arc<InMemoryStore>) -> Self {
                Self { store }
            }
        }

        #[async_trait]
        impl BaseRepository<$record, $new, i64> for $repo {
            async fn create(&self, new: $new) -> Result<$record, RepoError> {
                let mut tables = self.store.tables.write().await;
                let row = tables.$table.stage(new);
                tables.check_references(&row)?;
                tables.$table.commit(row)
            }

            async fn find_by_id(&self, id: i64) -> Result<Option<$record>, RepoError> {
                Ok(self.store.tables.read().await.$table.get(id))
            }

            async fn find_all(&self) -> Result<Vec<$record>, RepoError> {
                Ok(self.store.tables.read().await.$table.all())
            }

            async fn update(&self, entity: $record) -> Result<$record, RepoError> {
                let mut tables = self.store.tables.write().await;
                tables.check_references(&entity)?;
                tables.$table.replace(entity)
            }

            async fn delete(&self, id: i64) -> Result<(), RepoError> {
                self.store.tables.write().await.$table.remove(id)
            }
        }
    };
}

in_memory_repository!(InMemoryUserRepository, User, NewUser, users);
in_memory_repository!(InMemoryDiscussionRepository, Discussion, NewDiscussion, discussions);
in_memory_repository!(InMemoryCommentRepository, Comment, NewComment, comments);
in_memory_repository!(InMemoryLikeRepository, Like, NewLike, likes);
in_memory_repository!(InMemoryHashtagRepository, Hashtag, NewHashtag, hashtags);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<User>, RepoError> {
        let needle = fragment.to_lowercase();
        let tables = self.store.tables.read().await;
        Ok(tables
            .users
            .filter(|user| user.name.to_lowercase().contains(&needle)))
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if !tables.users.contains(id) {
            return Err(RepoError::NotFound);
        }

        let owned: Vec<i64> = tables
            .discussions
            .filter(|d| d.user_id == id)
            .iter()
            .map(|d| d.id)
            .collect();
        for discussion_id in owned {
            tables.purge_discussion(discussion_id)?;
        }
        tables.comments.remove_where(|c| c.user_id == id);
        tables.likes.remove_where(|l| l.user_id == id);
        tables.users.remove(id)
    }
}

#[async_trait]
impl DiscussionRepository for InMemoryDiscussionRepository {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Discussion>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.discussions.filter(|d| d.user_id == user_id))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.discussions.filter(|d| ids.contains(&d.id)))
    }

    async fn create_tagged(
        &self,
        new: NewDiscussion,
        tags: Vec<NewHashtag>,
    ) -> Result<Discussion, RepoError> {
        let mut tables = self.store.tables.write().await;
        let row = tables.discussions.stage(new);
        tables.check_references(&row)?;

        let discussion = tables.discussions.commit(row)?;
        for tag in tags {
            tables.tag(discussion.id, tag)?;
        }
        Ok(discussion)
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        self.store.tables.write().await.purge_discussion(id)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.comments.filter(|c| c.discussion_id == discussion_id))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.comments.filter(|c| c.user_id == user_id))
    }

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError> {
        Ok(self.find_by_discussion(discussion_id).await?.len() as u64)
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Like>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.likes.filter(|l| l.discussion_id == discussion_id))
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Like>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.likes.filter(|l| l.user_id == user_id))
    }

    async fn find_by_user_and_discussion(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<Option<Like>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables
            .likes
            .filter(|l| l.user_id == user_id && l.discussion_id == discussion_id)
            .into_iter()
            .next())
    }

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError> {
        Ok(self.find_by_discussion(discussion_id).await?.len() as u64)
    }
}

#[async_trait]
impl HashtagRepository for InMemoryHashtagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Hashtag>, RepoError> {
        let tables = self.store.tables.read().await;
        Ok(tables.hashtags.filter(|h| h.name == name).into_iter().next())
    }

    async fn tag(&self, discussion_id: i64, tag: NewHashtag) -> Result<Hashtag, RepoError> {
        self.store.tables.write().await.tag(discussion_id, tag)
    }

    async fn detach(&self, discussion_id: i64, hashtag_id: i64) -> Result<bool, RepoError> {
        let mut tables = self.store.tables.write().await;
        Ok(tables.links.remove(&(discussion_id, hashtag_id)))
    }

    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Hashtag>, RepoError> {
        let tables = self.store.tables.read().await;
        let mut hashtags: Vec<Hashtag> = tables
            .links
            .iter()
            .filter(|(d, _)| *d == discussion_id)
            .filter_map(|(_, h)| tables.hashtags.get(*h))
            .collect();
        hashtags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hashtags)
    }

    async fn discussion_ids(&self, hashtag_id: i64) -> Result<Vec<i64>, RepoError> {
        let tables = self.store.tables.read().await;
        // `links` is ordered by discussion id first, so the result is ascending.
        Ok(tables
            .links
            .iter()
            .filter(|(_, h)| *h == hashtag_id)
            .map(|(d, _)| *d)
            .collect())
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.store.tables.write().await;
        if !tables.hashtags.contains(id) {
            return Err(RepoError::NotFound);
        }
        tables.links.retain(|(_, h)| *h != id);
        tables.hashtags.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(name: &str) -> NewUser {
        NewUser::new(name.to_string(), "555".to_string(), "a@x.com".to_string())
    }

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let repo = InMemoryUserRepository::new(Arc::new(InMemoryStore::new()));

        let first = repo.create(new_user("Ana")).await.unwrap();
        let second = repo.create(new_user("Bo")).await.unwrap();
        repo.delete(second.id).await.unwrap();
        let third = repo.create(new_user("Cy")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(third.id, 3);
        let ids: Vec<i64> = repo.find_all().await.unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_search_ignores_case_both_ways() {
        let repo = InMemoryUserRepository::new(Arc::new(InMemoryStore::new()));
        repo.create(new_user("Ana")).await.unwrap();
        repo.create(new_user("banana")).await.unwrap();
        repo.create(new_user("Bob")).await.unwrap();

        let lower = repo.find_by_name_containing("an").await.unwrap();
        assert_eq!(lower.len(), 2);

        let upper = repo.find_by_name_containing("ANA").await.unwrap();
        let names: Vec<&str> = upper.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "banana"]);

        assert!(repo.find_by_name_containing("zed").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryUserRepository::new(Arc::new(InMemoryStore::new()));
        let ghost = User {
            id: 42,
            name: "Ghost".to_string(),
            mobile_no: "0".to_string(),
            email: "g@x.com".to_string(),
        };

        assert!(matches!(repo.update(ghost).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(42).await, Err(RepoError::NotFound)));
    }

    /// A store holding users 1 and 2 and discussion 1 by user 1.
    async fn seeded() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        let users = InMemoryUserRepository::new(store.clone());
        users.create(new_user("Ana")).await.unwrap();
        users.create(new_user("Bo")).await.unwrap();
        InMemoryDiscussionRepository::new(store.clone())
            .create(NewDiscussion::new(1, "hello".to_string(), None))
            .await
            .unwrap();
        store
    }

    fn tags(names: &[&str]) -> Vec<NewHashtag> {
        names.iter().map(|n| NewHashtag::parse(n).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_like_pair_is_unique() {
        let repo = InMemoryLikeRepository::new(seeded().await);

        repo.create(NewLike::new(1, 1)).await.unwrap();
        let again = repo.create(NewLike::new(1, 1)).await;
        assert!(matches!(again, Err(RepoError::Constraint(_))));

        repo.create(NewLike::new(2, 1)).await.unwrap();
        assert_eq!(repo.count_by_discussion(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_rows_must_reference_existing_parents() {
        let store = seeded().await;
        let discussions = InMemoryDiscussionRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store.clone());
        let likes = InMemoryLikeRepository::new(store);

        let orphan = comments
            .create(NewComment::new(1, 99, "lost".to_string()))
            .await;
        assert!(matches!(orphan, Err(RepoError::Constraint(_))));

        let ghost_author = comments
            .create(NewComment::new(42, 1, "boo".to_string()))
            .await;
        assert!(matches!(ghost_author, Err(RepoError::Constraint(_))));

        assert!(matches!(
            likes.create(NewLike::new(1, 99)).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(matches!(
            discussions
                .create(NewDiscussion::new(42, "nobody".to_string(), None))
                .await,
            Err(RepoError::Constraint(_))
        ));

        assert!(comments.find_all().await.unwrap().is_empty());
        assert!(likes.find_all().await.unwrap().is_empty());
        assert_eq!(discussions.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_hashtag_links() {
        let store = seeded().await;
        let hashtags = InMemoryHashtagRepository::new(store);

        let rust = hashtags.tag(1, NewHashtag::parse("rust").unwrap()).await.unwrap();
        let again = hashtags.tag(1, NewHashtag::parse("#Rust").unwrap()).await.unwrap();
        hashtags.tag(1, NewHashtag::parse("async").unwrap()).await.unwrap();
        assert_eq!(again.id, rust.id);

        let names: Vec<String> = hashtags
            .find_by_discussion(1)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["async", "rust"]);
        assert_eq!(hashtags.discussion_ids(rust.id).await.unwrap(), vec![1]);

        assert!(hashtags.detach(1, rust.id).await.unwrap());
        assert!(!hashtags.detach(1, rust.id).await.unwrap());

        let missing = hashtags.tag(99, NewHashtag::parse("web").unwrap()).await;
        assert!(matches!(missing, Err(RepoError::Constraint(_))));
        assert!(hashtags.find_by_name("web").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tagged_create_for_missing_user_writes_nothing() {
        let store = seeded().await;
        let discussions = InMemoryDiscussionRepository::new(store.clone());
        let hashtags = InMemoryHashtagRepository::new(store);

        let result = discussions
            .create_tagged(
                NewDiscussion::new(42, "nobody".to_string(), None),
                tags(&["rust", "web"]),
            )
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(discussions.find_all().await.unwrap().len(), 1);
        assert!(hashtags.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_delete_cascade_removes_everything_owned() {
        let store = seeded().await;
        let users = InMemoryUserRepository::new(store.clone());
        let discussions = InMemoryDiscussionRepository::new(store.clone());
        let comments = InMemoryCommentRepository::new(store.clone());
        let likes = InMemoryLikeRepository::new(store.clone());
        let hashtags = InMemoryHashtagRepository::new(store);

        let theirs = discussions
            .create_tagged(
                NewDiscussion::new(2, "bo's".to_string(), None),
                tags(&["rust"]),
            )
            .await
            .unwrap();
        // Ana comments on Bo's discussion, Bo comments and likes on Ana's.
        comments
            .create(NewComment::new(1, theirs.id, "hi".to_string()))
            .await
            .unwrap();
        comments
            .create(NewComment::new(2, 1, "yo".to_string()))
            .await
            .unwrap();
        likes.create(NewLike::new(2, 1)).await.unwrap();

        users.delete_cascade(2).await.unwrap();

        assert!(users.find_by_id(2).await.unwrap().is_none());
        let left: Vec<i64> = discussions
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(left, vec![1]);
        assert!(comments.find_all().await.unwrap().is_empty());
        assert!(likes.find_all().await.unwrap().is_empty());
        // The hashtag outlives its only discussion, the link does not.
        let rust = hashtags.find_by_name("rust").await.unwrap().unwrap();
        assert!(hashtags.discussion_ids(rust.id).await.unwrap().is_empty());

        assert!(matches!(users.delete_cascade(2).await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_hashtag_delete_cascade() {
        let store = seeded().await;
        let hashtags = InMemoryHashtagRepository::new(store);
        let rust = hashtags.tag(1, NewHashtag::parse("rust").unwrap()).await.unwrap();

        hashtags.delete_cascade(rust.id).await.unwrap();

        assert!(hashtags.find_by_discussion(1).await.unwrap().is_empty());
        assert!(matches!(
            hashtags.delete_cascade(rust.id).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_hashtag_name_is_unique() {
        let repo = InMemoryHashtagRepository::new(Arc::new(InMemoryStore::new()));
        repo.create(NewHashtag::parse("rust").unwrap()).await.unwrap();

        let again = repo.create(NewHashtag::parse("#Rust").unwrap()).await;
        assert!(matches!(again, Err(RepoError::Constraint(_))));
    }
}
