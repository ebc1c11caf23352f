use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Post;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Post::Table)
        .col(
            ColumnDef::new(Post::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Post::Kind)
                .string()
                .not_null()
                .string_len(20),
        )
        .col(
            ColumnDef::new(Post::Slug)
                .string()
                .not_null()
                .string_len(200),
        )
        .col(ColumnDef::new(Post::Title).string().not_null().default(""))
        .col(ColumnDef::new(Post::Content).text().not_null().default(""))
        .col(
            ColumnDef::new(Post::Status)
                .string()
                .not_null()
                .string_len(15),
        )
        .col(
            ColumnDef::new(Post::AuthorId)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(
            ColumnDef::new(Post::Date)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(ColumnDef::new(Post::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(Post::UpdatedAt).big_integer())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Post::Table).to_owned()
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

/// One record per slug and kind; schedule days use their date as slug.
pub struct CreateSlugIdx;

fn create_slug_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_post_kind_slug")
        .table(Post::Table)
        .unique()
        .col(Post::Kind)
        .col(Post::Slug)
        .to_owned()
}

fn drop_slug_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_post_kind_slug")
        .table(Post::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateSlugIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = create_slug_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statement = drop_slug_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statement).execute(connection).await?;

        Ok(())
    }
}
