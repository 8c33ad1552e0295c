//! Create discussions table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Discussions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Discussions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Discussions::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Discussions::Text).text().not_null())
                    .col(ColumnDef::new(Discussions::ImageUrl).string_len(2048).null())
                    .col(
                        ColumnDef::new(Discussions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_discussions_user")
                            .from(Discussions::Table, Discussions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's discussions)
        manager
            .create_index(
                Index::create()
                    .name("idx_discussions_user_id")
                    .table(Discussions::Table)
                    .col(Discussions::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Discussions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Discussions {
    Table,
    Id,
    UserId,
    Text,
    ImageUrl,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
