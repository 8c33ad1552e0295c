//! Discussion entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use agora_core::domain::{Discussion, NewDiscussion};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "discussions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
    #[sea_orm(has_many = "super::discussion_hashtag::Entity")]
    DiscussionHashtag,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl Related<super::discussion_hashtag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscussionHashtag.def()
    }
}

/// Many-to-many through `discussion_hashtags`.
impl Related<super::hashtag::Entity> for Entity {
    fn to() -> RelationDef {
        super::discussion_hashtag::Relation::Hashtag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::discussion_hashtag::Relation::Discussion.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Discussion {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            text: model.text,
            image_url: model.image_url,
            created_at: model.created_at.into(),
        }
    }
}

impl From<Discussion> for ActiveModel {
    fn from(discussion: Discussion) -> Self {
        Self {
            id: Set(discussion.id),
            user_id: Set(discussion.user_id),
            text: Set(discussion.text),
            image_url: Set(discussion.image_url),
            created_at: Set(discussion.created_at.into()),
        }
    }
}

impl From<NewDiscussion> for ActiveModel {
    fn from(discussion: NewDiscussion) -> Self {
        Self {
            id: NotSet,
            user_id: Set(discussion.user_id),
            text: Set(discussion.text),
            image_url: Set(discussion.image_url),
            created_at: Set(discussion.created_at.into()),
        }
    }
}
