//! Create hashtags and discussion_hashtags tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Hashtags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hashtags::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Hashtags::Name)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DiscussionHashtags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DiscussionHashtags::DiscussionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DiscussionHashtags::HashtagId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DiscussionHashtags::DiscussionId)
                            .col(DiscussionHashtags::HashtagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussion_hashtags_discussion")
                            .from(DiscussionHashtags::Table, DiscussionHashtags::DiscussionId)
                            .to(Discussions::Table, Discussions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussion_hashtags_hashtag")
                            .from(DiscussionHashtags::Table, DiscussionHashtags::HashtagId)
                            .to(Hashtags::Table, Hashtags::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: hashtag_id (for listing discussions by hashtag)
        manager
            .create_index(
                Index::create()
                    .name("idx_discussion_hashtags_hashtag_id")
                    .table(DiscussionHashtags::Table)
                    .col(DiscussionHashtags::HashtagId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DiscussionHashtags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Hashtags::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Hashtags {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum DiscussionHashtags {
    Table,
    DiscussionId,
    HashtagId,
}

#[derive(Iden)]
enum Discussions {
    Table,
    Id,
}
