//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, JoinType, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use agora_core::domain::{Comment, Discussion, Hashtag, Like, NewDiscussion, NewHashtag, User};
use agora_core::error::RepoError;
use agora_core::ports::{
    CommentRepository, DiscussionRepository, HashtagRepository, LikeRepository, UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::discussion::{self, Entity as DiscussionEntity};
use super::entity::discussion_hashtag::{self, Entity as DiscussionHashtagEntity};
use super::entity::hashtag::{self, Entity as HashtagEntity};
use super::entity::like::{self, Entity as LikeEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL discussion repository.
pub type PostgresDiscussionRepository = PostgresBaseRepository<DiscussionEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL like repository.
pub type PostgresLikeRepository = PostgresBaseRepository<LikeEntity>;

/// PostgreSQL hashtag repository, also owning `discussion_hashtags`.
pub type PostgresHashtagRepository = PostgresBaseRepository<HashtagEntity>;

/// `%fragment%` with LIKE metacharacters escaped, lower-cased.
fn contains_pattern(fragment: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

/// Find or create the hashtag named by `tag` and link it to a discussion.
async fn tag_on<C: ConnectionTrait>(
    conn: &C,
    discussion_id: i64,
    tag: NewHashtag,
) -> Result<Hashtag, RepoError> {
    let name = tag.name.clone();

    HashtagEntity::insert(hashtag::ActiveModel::from(tag))
        .on_conflict(
            OnConflict::column(hashtag::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    let hashtag = HashtagEntity::find()
        .filter(hashtag::Column::Name.eq(name.as_str()))
        .one(conn)
        .await
        .map_err(map_db_err)?
        .ok_or_else(|| RepoError::Query(format!("Hashtag '{name}' missing after insert")))?;

    let link = discussion_hashtag::ActiveModel {
        discussion_id: Set(discussion_id),
        hashtag_id: Set(hashtag.id),
    };
    DiscussionHashtagEntity::insert(link)
        .on_conflict(
            OnConflict::columns([
                discussion_hashtag::Column::DiscussionId,
                discussion_hashtag::Column::HashtagId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(map_db_err)?;

    Ok(hashtag.into())
}

/// Delete the comments, likes and hashtag links of these discussions.
async fn delete_dependents<C: ConnectionTrait>(
    conn: &C,
    discussion_ids: &[i64],
) -> Result<(), RepoError> {
    CommentEntity::delete_many()
        .filter(comment::Column::DiscussionId.is_in(discussion_ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    LikeEntity::delete_many()
        .filter(like::Column::DiscussionId.is_in(discussion_ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;
    DiscussionHashtagEntity::delete_many()
        .filter(discussion_hashtag::Column::DiscussionId.is_in(discussion_ids.iter().copied()))
        .exec(conn)
        .await
        .map_err(map_db_err)?;

    Ok(())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<User>, RepoError> {
        tracing::debug!(fragment, "Searching users by name");

        let result = UserEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(user::Column::Name)))
                    .like(contains_pattern(fragment)),
            )
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let owned: Vec<i64> = DiscussionEntity::find()
            .filter(discussion::Column::UserId.eq(id))
            .all(&txn)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|d| d.id)
            .collect();
        if !owned.is_empty() {
            delete_dependents(&txn, &owned).await?;
        }

        CommentEntity::delete_many()
            .filter(comment::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        LikeEntity::delete_many()
            .filter(like::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        DiscussionEntity::delete_many()
            .filter(discussion::Column::UserId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            // Dropping `txn` rolls back.
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(user_id = id, discussions = owned.len(), "User cascade deleted");
        Ok(())
    }
}

#[async_trait]
impl DiscussionRepository for PostgresDiscussionRepository {
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Discussion>, RepoError> {
        let result = DiscussionEntity::find()
            .filter(discussion::Column::UserId.eq(user_id))
            .order_by_asc(discussion::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Discussion>, RepoError> {
        let result = DiscussionEntity::find()
            .filter(discussion::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(discussion::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn create_tagged(
        &self,
        new: NewDiscussion,
        tags: Vec<NewHashtag>,
    ) -> Result<Discussion, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let model = discussion::ActiveModel::from(new)
            .insert(&txn)
            .await
            .map_err(map_db_err)?;
        for tag in tags {
            tag_on(&txn, model.id, tag).await?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        delete_dependents(&txn, &[id]).await?;
        let result = DiscussionEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::DiscussionId.eq(discussion_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::UserId.eq(user_id))
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::DiscussionId.eq(discussion_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::DiscussionId.eq(discussion_id))
            .order_by_asc(like::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .order_by_asc(like::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_user_and_discussion(
        &self,
        user_id: i64,
        discussion_id: i64,
    ) -> Result<Option<Like>, RepoError> {
        let result = LikeEntity::find()
            .filter(like::Column::UserId.eq(user_id))
            .filter(like::Column::DiscussionId.eq(discussion_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn count_by_discussion(&self, discussion_id: i64) -> Result<u64, RepoError> {
        LikeEntity::find()
            .filter(like::Column::DiscussionId.eq(discussion_id))
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl HashtagRepository for PostgresHashtagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Hashtag>, RepoError> {
        let result = HashtagEntity::find()
            .filter(hashtag::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn tag(&self, discussion_id: i64, tag: NewHashtag) -> Result<Hashtag, RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let hashtag = tag_on(&txn, discussion_id, tag).await?;
        txn.commit().await.map_err(map_db_err)?;
        Ok(hashtag)
    }

    async fn detach(&self, discussion_id: i64, hashtag_id: i64) -> Result<bool, RepoError> {
        let result = DiscussionHashtagEntity::delete_many()
            .filter(discussion_hashtag::Column::DiscussionId.eq(discussion_id))
            .filter(discussion_hashtag::Column::HashtagId.eq(hashtag_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn find_by_discussion(&self, discussion_id: i64) -> Result<Vec<Hashtag>, RepoError> {
        let result = HashtagEntity::find()
            .join(JoinType::InnerJoin, hashtag::Relation::DiscussionHashtag.def())
            .filter(discussion_hashtag::Column::DiscussionId.eq(discussion_id))
            .order_by_asc(hashtag::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn discussion_ids(&self, hashtag_id: i64) -> Result<Vec<i64>, RepoError> {
        let links = DiscussionHashtagEntity::find()
            .filter(discussion_hashtag::Column::HashtagId.eq(hashtag_id))
            .order_by_asc(discussion_hashtag::Column::DiscussionId)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(links.into_iter().map(|link| link.discussion_id).collect())
    }

    async fn delete_cascade(&self, id: i64) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        DiscussionHashtagEntity::delete_many()
            .filter(discussion_hashtag::Column::HashtagId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        let result = HashtagEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)
    }
}
