use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::ReviewReaction;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ReviewReaction::Table)
        .col(
            ColumnDef::new(ReviewReaction::ReviewId)
                .string()
                .string_len(64)
                .not_null(),
        )
        .col(
            ColumnDef::new(ReviewReaction::UserId)
                .string()
                .string_len(64)
                .not_null(),
        )
        .col(
            ColumnDef::new(ReviewReaction::ReactionType)
                .string()
                .string_len(10)
                .not_null(),
        )
        .col(
            ColumnDef::new(ReviewReaction::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(ReviewReaction::UpdatedAt)
                .big_integer()
                .not_null(),
        )
        .primary_key(
            Index::create()
                .col(ReviewReaction::ReviewId)
                .col(ReviewReaction::UserId),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ReviewReaction::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateIdx1;

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_review_reaction_review_type")
        .table(ReviewReaction::Table)
        .col(ReviewReaction::ReviewId)
        .col(ReviewReaction::ReactionType)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_review_reaction_review_type")
        .table(ReviewReaction::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIdx1 {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_idx_1().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
