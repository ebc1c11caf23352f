use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use signup_db::table::{Category as CategoryTable, Post as PostTable, PostCategory, PostMeta};
use signup_shared::{Error, Result};
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::{Category, Inserted, NewPost, Post, PostKind, PostStatus, PostUpdate, Store};

#[derive(Clone)]
pub struct SqliteStore {
    pub read_db: SqlitePool,
    pub write_db: SqlitePool,
}

impl SqliteStore {
    pub fn new(read_db: SqlitePool, write_db: SqlitePool) -> Self {
        Self { read_db, write_db }
    }

    /// Single pool for both reads and writes, used by the CLI and tests
    pub fn single(pool: SqlitePool) -> Self {
        Self::new(pool.clone(), pool)
    }
}

#[async_trait::async_trait]
impl Store for SqliteStore {
    async fn find_by_slug(
        &self,
        kind: PostKind,
        slug: &str,
        statuses: &[PostStatus],
    ) -> Result<Option<String>> {
        let statement = Query::select()
            .columns([PostTable::Id])
            .from(PostTable::Table)
            .and_where(Expr::col(PostTable::Kind).eq(kind.to_string()))
            .and_where(Expr::col(PostTable::Slug).eq(slug))
            .and_where(Expr::col(PostTable::Status).is_in(statuses.iter().map(|s| s.to_string())))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|(id,)| id))
    }

    #[tracing::instrument(skip_all, fields(kind = %post.kind, slug = %post.slug))]
    async fn insert(&self, post: NewPost) -> Result<Inserted> {
        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(PostTable::Table)
            .columns([
                PostTable::Id,
                PostTable::Kind,
                PostTable::Slug,
                PostTable::Title,
                PostTable::Content,
                PostTable::Status,
                PostTable::AuthorId,
                PostTable::Date,
                PostTable::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                post.kind.to_string().into(),
                post.slug.into(),
                post.title.into(),
                post.content.into(),
                post.status.to_string().into(),
                post.author_id.into(),
                post.date.into(),
                OffsetDateTime::now_utc().unix_timestamp().into(),
            ])
            .on_conflict(
                OnConflict::columns([PostTable::Kind, PostTable::Slug])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            tracing::debug!("post slug already taken");

            return Ok(Inserted::Conflict);
        }

        Ok(Inserted::Created(id))
    }

    async fn update(&self, id: &str, update: PostUpdate) -> Result<()> {
        if update.is_empty() {
            return Ok(());
        }

        let slug = update.slug.to_owned();
        let mut statement = Query::update();
        statement.table(PostTable::Table);

        if let Some(title) = update.title {
            statement.value(PostTable::Title, title);
        }

        if let Some(slug) = update.slug {
            statement.value(PostTable::Slug, slug);
        }

        if let Some(content) = update.content {
            statement.value(PostTable::Content, content);
        }

        if let Some(status) = update.status {
            statement.value(PostTable::Status, status.to_string());
        }

        statement
            .value(
                PostTable::UpdatedAt,
                OffsetDateTime::now_utc().unix_timestamp(),
            )
            .and_where(Expr::col(PostTable::Id).eq(id));

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => Err(Error::Conflict(
                format!("slug {}", slug.unwrap_or_default()),
            )),
            Err(err) => Err(err.into()),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Post>> {
        let statement = Query::select()
            .columns([
                PostTable::Id,
                PostTable::Kind,
                PostTable::Slug,
                PostTable::Title,
                PostTable::Content,
                PostTable::Status,
                PostTable::AuthorId,
                PostTable::Date,
                PostTable::CreatedAt,
                PostTable::UpdatedAt,
            ])
            .from(PostTable::Table)
            .and_where(Expr::col(PostTable::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }

    async fn categories(&self, id: &str) -> Result<Vec<Category>> {
        let statement = Query::select()
            .columns([
                (CategoryTable::Table, CategoryTable::Id),
                (CategoryTable::Table, CategoryTable::Name),
                (CategoryTable::Table, CategoryTable::ParentId),
            ])
            .from(CategoryTable::Table)
            .inner_join(
                PostCategory::Table,
                Expr::col((PostCategory::Table, PostCategory::CategoryId))
                    .equals((CategoryTable::Table, CategoryTable::Id)),
            )
            .and_where(Expr::col((PostCategory::Table, PostCategory::PostId)).eq(id))
            .order_by((CategoryTable::Table, CategoryTable::Name), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, Category, _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?)
    }

    async fn meta(&self, id: &str, key: &str) -> Result<Option<String>> {
        let statement = Query::select()
            .columns([PostMeta::Value])
            .from(PostMeta::Table)
            .and_where(Expr::col(PostMeta::PostId).eq(id))
            .and_where(Expr::col(PostMeta::Key).eq(key))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn set_meta(&self, id: &str, key: &str, value: &str) -> Result<()> {
        let statement = Query::insert()
            .into_table(PostMeta::Table)
            .columns([PostMeta::PostId, PostMeta::Key, PostMeta::Value])
            .values_panic([id.into(), key.into(), value.into()])
            .on_conflict(
                OnConflict::columns([PostMeta::PostId, PostMeta::Key])
                    .update_column(PostMeta::Value)
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    async fn insert_category(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        let id = Ulid::new().to_string();
        let statement = Query::insert()
            .into_table(CategoryTable::Table)
            .columns([
                CategoryTable::Id,
                CategoryTable::Name,
                CategoryTable::ParentId,
            ])
            .values_panic([
                id.to_owned().into(),
                name.into(),
                parent_id.map(ToOwned::to_owned).into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(id)
    }

    async fn attach_category(&self, id: &str, category_id: &str) -> Result<()> {
        let statement = Query::insert()
            .into_table(PostCategory::Table)
            .columns([PostCategory::PostId, PostCategory::CategoryId])
            .values_panic([id.into(), category_id.into()])
            .on_conflict(
                OnConflict::columns([PostCategory::PostId, PostCategory::CategoryId])
                    .do_nothing()
                    .to_owned(),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }
}
