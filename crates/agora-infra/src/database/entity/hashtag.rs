//! Hashtag entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

use agora_core::domain::{Hashtag, NewHashtag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hashtags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::discussion_hashtag::Entity")]
    DiscussionHashtag,
}

impl Related<super::discussion_hashtag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DiscussionHashtag.def()
    }
}

impl Related<super::discussion::Entity> for Entity {
    fn to() -> RelationDef {
        super::discussion_hashtag::Relation::Discussion.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::discussion_hashtag::Relation::Hashtag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Hashtag {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<Hashtag> for ActiveModel {
    fn from(hashtag: Hashtag) -> Self {
        Self {
            id: Set(hashtag.id),
            name: Set(hashtag.name),
        }
    }
}

impl From<NewHashtag> for ActiveModel {
    fn from(hashtag: NewHashtag) -> Self {
        Self {
            id: NotSet,
            name: Set(hashtag.name),
        }
    }
}
