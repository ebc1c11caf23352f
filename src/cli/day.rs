use anyhow::{Context, Result, bail};
use signup_schedule::{Role, SqliteStore, Store};

use crate::config::Config;

async fn open(config: &Config) -> Result<SqliteStore> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;

    Ok(SqliteStore::single(pool))
}

async fn existing_day(store: &SqliteStore, date: &str) -> Result<String> {
    signup_schedule::find(store, date)
        .await?
        .with_context(|| format!("no schedule day for {date}"))
}

/// Schedule day for `date`, created when missing
pub async fn create(config: &Config, date: &str, author: Option<String>) -> Result<String> {
    let store = open(config).await?;
    let author = author.unwrap_or_else(|| config.schedule.author.to_owned());

    let Some(id) = signup_schedule::get_or_create(&store, date, &author).await? else {
        bail!("{date} is not a YYYY-MM-DD date");
    };

    tracing::info!(id = %id, date, "schedule day ready");

    Ok(id)
}

pub async fn limits(
    config: &Config,
    date: &str,
    students: Option<u32>,
    volunteers: Option<u32>,
) -> Result<()> {
    let store = open(config).await?;
    let id = existing_day(&store, date).await?;

    for (role, limit) in [(Role::Youth, students), (Role::Volunteers, volunteers)] {
        let Some(limit) = limit else {
            continue;
        };

        store
            .set_meta(&id, role.limit_key(), &limit.to_string())
            .await?;

        tracing::info!(date, %role, limit, "limit updated");
    }

    Ok(())
}

/// Signs a category (a person) up for the day
pub async fn tag(config: &Config, date: &str, category_id: &str) -> Result<()> {
    let store = open(config).await?;
    let id = existing_day(&store, date).await?;

    store.attach_category(&id, category_id).await?;

    tracing::info!(date, category = category_id, "category attached");

    Ok(())
}

/// Returns whether the title had to be rewritten
pub async fn normalize(config: &Config, id: &str) -> Result<bool> {
    let store = open(config).await?;

    Ok(signup_schedule::normalize_title(&store, id).await?)
}
