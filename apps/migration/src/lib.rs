//! Schema migrations for the Agora tables.
//!
//! One migration per table, applied in dependency order.

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_discussions_table;
mod m20250101_000003_create_comments_table;
mod m20250101_000004_create_likes_table;
mod m20250101_000005_create_hashtags_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_discussions_table::Migration),
            Box::new(m20250101_000003_create_comments_table::Migration),
            Box::new(m20250101_000004_create_likes_table::Migration),
            Box::new(m20250101_000005_create_hashtags_tables::Migration),
        ]
    }
}
