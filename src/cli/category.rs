use anyhow::Result;
use signup_schedule::{SqliteStore, Store};

use crate::config::Config;

pub async fn add(config: &Config, name: &str, parent: Option<&str>) -> Result<String> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let store = SqliteStore::single(pool);

    let id = store.insert_category(name, parent).await?;

    tracing::info!(id = %id, name, parent, "category added");

    Ok(id)
}
