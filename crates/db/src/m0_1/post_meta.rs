use sea_query::{ColumnDef, Index, Table, TableCreateStatement, TableDropStatement};

use crate::table::PostMeta;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(PostMeta::Table)
        .col(
            ColumnDef::new(PostMeta::PostId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(PostMeta::Key)
                .string()
                .not_null()
                .string_len(50),
        )
        .col(ColumnDef::new(PostMeta::Value).text().not_null())
        .primary_key(Index::create().col(PostMeta::PostId).col(PostMeta::Key))
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(PostMeta::Table).to_owned()
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
