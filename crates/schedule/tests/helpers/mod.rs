use std::{path::PathBuf, str::FromStr, time::Duration};

use signup_schedule::{CategoryMapping, SqliteStore, Store};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub struct TestState {
    pub store: SqliteStore,
    #[allow(dead_code)]
    pub mapping: CategoryMapping,
}

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<TestState> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    signup_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    let store = SqliteStore::single(pool);
    let youth = store.insert_category("Students", None).await?;
    let volunteers = store.insert_category("Volunteers", None).await?;

    Ok(TestState {
        store,
        mapping: CategoryMapping {
            youth_category: youth,
            volunteers_category: volunteers,
        },
    })
}

#[allow(dead_code)]
pub async fn sign_up(
    state: &TestState,
    day_id: &str,
    parent: &str,
    names: impl IntoIterator<Item = impl Into<String>>,
) -> anyhow::Result<()> {
    for name in names.into_iter() {
        let name = name.into();
        let category = state.store.insert_category(&name, Some(parent)).await?;
        state.store.attach_category(day_id, &category).await?;
    }

    Ok(())
}
