//! Service-layer tests over the in-memory repositories.

use std::sync::Arc;

use async_trait::async_trait;

use agora_core::DomainError;
use agora_core::domain::{
    Discussion, DiscussionUpdate, Hashtag, NewComment, NewDiscussion, NewHashtag, NewLike,
    NewUser, User,
};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, DiscussionRepository, HashtagRepository};
use agora_core::services::Services;
use agora_infra::Repositories;

fn services() -> Services {
    Repositories::in_memory().into_services()
}

fn connection_lost() -> RepoError {
    RepoError::Connection("connection reset by peer".to_string())
}

/// Discussion store whose tagged inserts fail as if the connection dropped.
struct UnreachableOnTaggedCreate {
    inner: Arc<dyn DiscussionRepository>,
}

#[async_trait]
impl BaseRepository<Discussion, NewDiscussion, i64> for UnreachableOnTaggedCreate {
    async fn create(&self, new: NewDiscussion) -> Result<Discussion, RepoError> {
        self.inner.create(new).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Discussion>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Discussion>, RepoError> {
        self.inner.find_all().await
    }

    async fn update(&self, entity: Discussion) -> Result<Discussion, RepoError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl DiscussionRepository for UnreachableOnTaggedCreate {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Discussion>, RepoError> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, RepoError> {
        self.inner.find_by_ids(ids).await
    }

    async fn create_tagged(
        &self,
        new: NewDiscussion,
        tags: Vec<NewHashtag>,
    ) -> Result<Discussion, RepoError> {
        if tags.is_empty() {
            return self.inner.create_tagged(new, tags).await;
        }
        Err(connection_lost())
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        self.inner.delete_cascade(id).await
    }
}

/// Hashtag store whose link writes fail as if the connection dropped.
struct UnreachableOnTag {
    inner: Arc<dyn HashtagRepository>,
}

#[async_trait]
impl BaseRepository<Hashtag, NewHashtag, i64> for UnreachableOnTag {
    async fn create(&self, new: NewHashtag) -> Result<Hashtag, RepoError> {
        self.inner.create(new).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Hashtag>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Hashtag>, RepoError> {
        self.inner.find_all().await
    }

    async fn update(&self, entity: Hashtag) -> Result<Hashtag, RepoError> {
        self.inner.update(entity).await
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl HashtagRepository for UnreachableOnTag {
    async fn find_by_name(&self, name: &str) -> Result<Option<Hashtag>, RepoError> {
        self.inner.find_by_name(name).await
    }

    async fn tag(&self, _discussion_id: i64, _tag: NewHashtag) -> Result<Hashtag, RepoError> {
        Err(connection_lost())
    }

    async fn detach(&self, discussion_id: i64, hashtag_id: i64) -> Result<bool, RepoError> {
        self.inner.detach(discussion_id, hashtag_id).await
    }

    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Hashtag>, RepoError> {
        self.inner.find_by_discussion(discussion_id).await
    }

    async fn discussion_ids(&self, hashtag_id: i64) -> Result<Vec<i64>, RepoError> {
        self.inner.discussion_ids(hashtag_id).await
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        self.inner.delete_cascade(id).await
    }
}

fn ana() -> NewUser {
    NewUser::new(
        "Ana".to_string(),
        "555".to_string(),
        "a@x.com".to_string(),
    )
}

async fn user(services: &Services, name: &str) -> User {
    services
        .users
        .create(NewUser::new(
            name.to_string(),
            "100".to_string(),
            format!("{}@x.com", name.to_lowercase()),
        ))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_then_get_user() {
    let services = services();

    let created = services.users.create(ana()).await.unwrap();
    let fetched = services.users.get(created.id).await.unwrap();

    assert_eq!(fetched, created);
    assert_eq!(fetched.name, "Ana");
    assert_eq!(fetched.mobile_no, "555");
    assert_eq!(fetched.email, "a@x.com");
}

#[tokio::test]
async fn test_update_user_overwrites_only_mutable_fields() {
    let services = services();
    let created = services.users.create(ana()).await.unwrap();
    let discussion = services
        .discussions
        .create(NewDiscussion::new(created.id, "hi".to_string(), None), &[])
        .await
        .unwrap();

    let updated = services
        .users
        .update(
            created.id,
            NewUser::new(
                "Ana Maria".to_string(),
                "777".to_string(),
                "am@x.com".to_string(),
            ),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Ana Maria");
    assert_eq!(updated.mobile_no, "777");
    assert_eq!(updated.email, "am@x.com");

    let owned = services.discussions.list_by_user(created.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].id, discussion.discussion.id);
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let services = services();
    let result = services.users.update(9, ana()).await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound { entity: "User", id: 9 })
    ));
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let services = services();
    let result = services.users.delete(1).await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound { entity: "User", id: 1 })
    ));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let services = services();
    let ana = user(&services, "Ana").await;
    let diana = user(&services, "diana").await;
    user(&services, "Bob").await;

    let lower: Vec<i64> = services
        .users
        .search("an")
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(lower, vec![ana.id, diana.id]);

    let upper: Vec<i64> = services
        .users
        .search("DIA")
        .await
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(upper, vec![diana.id]);
}

#[tokio::test]
async fn test_discussion_requires_existing_user() {
    let services = services();
    let result = services
        .discussions
        .create(NewDiscussion::new(42, "orphan".to_string(), None), &[])
        .await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound { entity: "User", id: 42 })
    ));
    assert!(services.discussions.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_discussion_hashtags_are_normalised_and_shared() {
    let services = services();
    let author = user(&services, "Ana").await;

    let first = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "Rust!".to_string(), None),
            &["#Rust".to_string(), "rust".to_string(), "web_dev".to_string()],
        )
        .await
        .unwrap();
    let second = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "More Rust".to_string(), None),
            &["RUST".to_string()],
        )
        .await
        .unwrap();

    let names: Vec<&str> = first.hashtags.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["rust", "web_dev"]);
    assert_eq!(services.hashtags.list().await.unwrap().len(), 2);

    let rust_id = first.hashtags[0].id;
    assert_eq!(second.hashtags[0].id, rust_id);

    let tagged: Vec<i64> = services
        .discussions
        .list_by_hashtag(rust_id)
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(tagged, vec![first.discussion.id, second.discussion.id]);
}

#[tokio::test]
async fn test_invalid_hashtag_writes_nothing() {
    let services = services();
    let author = user(&services, "Ana").await;

    let result = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "text".to_string(), None),
            &["ok".to_string(), "not ok".to_string()],
        )
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(services.discussions.list().await.unwrap().is_empty());
    assert!(services.hashtags.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_and_remove_hashtag() {
    let services = services();
    let author = user(&services, "Ana").await;
    let created = services
        .discussions
        .create(NewDiscussion::new(author.id, "text".to_string(), None), &[])
        .await
        .unwrap();
    let id = created.discussion.id;

    let detail = services.discussions.add_hashtag(id, "#News").await.unwrap();
    assert_eq!(detail.hashtags.len(), 1);
    let hashtag_id = detail.hashtags[0].id;

    services
        .discussions
        .remove_hashtag(id, hashtag_id)
        .await
        .unwrap();
    let again = services.discussions.remove_hashtag(id, hashtag_id).await;
    assert!(matches!(again, Err(DomainError::NotFound { .. })));

    // The hashtag itself survives being unlinked.
    services.hashtags.get(hashtag_id).await.unwrap();
}

#[tokio::test]
async fn test_update_discussion() {
    let services = services();
    let author = user(&services, "Ana").await;
    let created = services
        .discussions
        .create(NewDiscussion::new(author.id, "draft".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;

    let updated = services
        .discussions
        .update(
            created.id,
            DiscussionUpdate {
                text: "final".to_string(),
                image_url: Some("img/cat.png".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.user_id, author.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.text, "final");
    assert_eq!(updated.image_url.as_deref(), Some("img/cat.png"));
}

#[tokio::test]
async fn test_second_like_for_same_pair_is_rejected() {
    let services = services();
    let author = user(&services, "Ana").await;
    let fan = user(&services, "Bob").await;
    let discussion = services
        .discussions
        .create(NewDiscussion::new(author.id, "like me".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;

    services
        .likes
        .create(NewLike::new(fan.id, discussion.id))
        .await
        .unwrap();
    let again = services
        .likes
        .create(NewLike::new(fan.id, discussion.id))
        .await;
    assert!(matches!(
        again,
        Err(DomainError::Duplicate { entity: "Like", .. })
    ));

    services
        .likes
        .create(NewLike::new(author.id, discussion.id))
        .await
        .unwrap();
    let detail = services.discussions.get_detail(discussion.id).await.unwrap();
    assert_eq!(detail.like_count, 2);
}

#[tokio::test]
async fn test_comment_requires_existing_discussion() {
    let services = services();
    let author = user(&services, "Ana").await;

    let result = services
        .comments
        .create(NewComment::new(author.id, 5, "hello?".to_string()))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity: "Discussion",
            id: 5
        })
    ));
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let services = services();
    let author = user(&services, "Ana").await;
    let discussion = services
        .discussions
        .create(NewDiscussion::new(author.id, "topic".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;

    let comment = services
        .comments
        .create(NewComment::new(author.id, discussion.id, "first".to_string()))
        .await
        .unwrap();
    let edited = services
        .comments
        .update(comment.id, "first!".to_string())
        .await
        .unwrap();
    assert_eq!(edited.text, "first!");
    assert_eq!(edited.discussion_id, discussion.id);

    let listed = services
        .comments
        .list_by_discussion(discussion.id)
        .await
        .unwrap();
    assert_eq!(listed, vec![edited]);

    services.comments.delete(comment.id).await.unwrap();
    assert!(matches!(
        services.comments.get(comment.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_deleting_discussion_cascades() {
    let services = services();
    let author = user(&services, "Ana").await;
    let fan = user(&services, "Bob").await;
    let discussion = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "topic".to_string(), None),
            &["rust".to_string()],
        )
        .await
        .unwrap()
        .discussion;
    services
        .comments
        .create(NewComment::new(fan.id, discussion.id, "nice".to_string()))
        .await
        .unwrap();
    services
        .likes
        .create(NewLike::new(fan.id, discussion.id))
        .await
        .unwrap();

    services.discussions.delete(discussion.id).await.unwrap();

    assert!(services.comments.list().await.unwrap().is_empty());
    assert!(services.likes.list().await.unwrap().is_empty());
    let rust = &services.hashtags.list().await.unwrap()[0];
    assert!(
        services
            .discussions
            .list_by_hashtag(rust.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_deleting_user_cascades_to_owned_records() {
    let services = services();
    let author = user(&services, "Ana").await;
    let fan = user(&services, "Bob").await;

    let own = services
        .discussions
        .create(NewDiscussion::new(author.id, "mine".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;
    let other = services
        .discussions
        .create(NewDiscussion::new(fan.id, "theirs".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;

    // Bob engages with Ana's discussion; Ana engages with Bob's.
    services
        .comments
        .create(NewComment::new(fan.id, own.id, "hi".to_string()))
        .await
        .unwrap();
    services
        .comments
        .create(NewComment::new(author.id, other.id, "yo".to_string()))
        .await
        .unwrap();
    services
        .likes
        .create(NewLike::new(author.id, other.id))
        .await
        .unwrap();

    services.users.delete(author.id).await.unwrap();

    assert!(matches!(
        services.users.get(author.id).await,
        Err(DomainError::NotFound { .. })
    ));
    let remaining: Vec<i64> = services
        .discussions
        .list()
        .await
        .unwrap()
        .iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(remaining, vec![other.id]);
    assert!(services.comments.list().await.unwrap().is_empty());

    let detail = services.discussions.get_detail(other.id).await.unwrap();
    assert_eq!(detail.comment_count, 0);
    assert_eq!(detail.like_count, 0);
}

#[tokio::test]
async fn test_hashtag_rename_conflict() {
    let services = services();
    let rust = services.hashtags.create("rust").await.unwrap();
    services.hashtags.create("go").await.unwrap();

    let clash = services.hashtags.update(rust.id, "#Go").await;
    assert!(matches!(
        clash,
        Err(DomainError::Duplicate {
            entity: "Hashtag",
            ..
        })
    ));

    let renamed = services.hashtags.update(rust.id, "RustLang").await.unwrap();
    assert_eq!(renamed.id, rust.id);
    assert_eq!(renamed.name, "rustlang");

    let duplicate = services.hashtags.create("rustlang").await;
    assert!(matches!(duplicate, Err(DomainError::Duplicate { .. })));
}

#[tokio::test]
async fn test_deleting_hashtag_unlinks_discussions() {
    let services = services();
    let author = user(&services, "Ana").await;
    let detail = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "tagged".to_string(), None),
            &["temp".to_string()],
        )
        .await
        .unwrap();

    services
        .hashtags
        .delete(detail.hashtags[0].id)
        .await
        .unwrap();

    let after = services
        .discussions
        .get_detail(detail.discussion.id)
        .await
        .unwrap();
    assert!(after.hashtags.is_empty());
}

#[tokio::test]
async fn test_failed_tagged_create_leaves_nothing_behind() {
    let mut repos = Repositories::in_memory();
    repos.discussions = Arc::new(UnreachableOnTaggedCreate {
        inner: repos.discussions.clone(),
    });
    let services = repos.into_services();
    let author = user(&services, "Ana").await;

    let result = services
        .discussions
        .create(
            NewDiscussion::new(author.id, "tagged".to_string(), None),
            &["rust".to_string()],
        )
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Repository(RepoError::Connection(_)))
    ));
    assert!(services.discussions.list().await.unwrap().is_empty());
    assert!(services.hashtags.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_tagging_leaves_nothing_behind() {
    let mut repos = Repositories::in_memory();
    repos.hashtags = Arc::new(UnreachableOnTag {
        inner: repos.hashtags.clone(),
    });
    let services = repos.into_services();
    let author = user(&services, "Ana").await;
    let created = services
        .discussions
        .create(NewDiscussion::new(author.id, "plain".to_string(), None), &[])
        .await
        .unwrap();

    let result = services
        .discussions
        .add_hashtag(created.discussion.id, "rust")
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Repository(RepoError::Connection(_)))
    ));
    assert!(services.hashtags.list().await.unwrap().is_empty());
    let detail = services
        .discussions
        .get_detail(created.discussion.id)
        .await
        .unwrap();
    assert!(detail.hashtags.is_empty());
}

#[tokio::test]
async fn test_activity_of_one_user() {
    let services = services();
    let author = user(&services, "Ana").await;
    let fan = user(&services, "Bob").await;
    let discussion = services
        .discussions
        .create(NewDiscussion::new(author.id, "topic".to_string(), None), &[])
        .await
        .unwrap()
        .discussion;

    services
        .comments
        .create(NewComment::new(fan.id, discussion.id, "first".to_string()))
        .await
        .unwrap();
    services
        .comments
        .create(NewComment::new(author.id, discussion.id, "reply".to_string()))
        .await
        .unwrap();
    services
        .comments
        .create(NewComment::new(fan.id, discussion.id, "second".to_string()))
        .await
        .unwrap();
    services
        .likes
        .create(NewLike::new(fan.id, discussion.id))
        .await
        .unwrap();

    let texts: Vec<String> = services
        .comments
        .list_by_user(fan.id)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.text)
        .collect();
    assert_eq!(texts, vec!["first", "second"]);

    let likes = services.likes.list_by_user(fan.id).await.unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].discussion_id, discussion.id);
    assert!(services.likes.list_by_user(author.id).await.unwrap().is_empty());

    assert!(matches!(
        services.comments.list_by_user(42).await,
        Err(DomainError::NotFound { entity: "User", id: 42 })
    ));
    assert!(matches!(
        services.likes.list_by_user(42).await,
        Err(DomainError::NotFound { entity: "User", id: 42 })
    ));
}
