//! Test helpers: a migrated SQLite file in a temporary directory and a
//! router wired to it

#![allow(dead_code)]

use std::path::Path;

use signup::{
    AppState, Config,
    config::{DatabaseConfig, LoggingConfig, ScheduleConfig, ServerConfig},
};
use signup_schedule::{CategoryMapping, SqliteStore, Store};

pub struct TestApp {
    pub state: AppState,
    pub router: axum::Router,
}

impl TestApp {
    pub fn store(&self) -> &SqliteStore {
        &self.state.store
    }

    pub fn mapping(&self) -> &CategoryMapping {
        &self.state.config.roster
    }

    pub async fn sign_up(&self, day_id: &str, parent: &str, names: &[&str]) -> anyhow::Result<()> {
        for name in names {
            let category = self.store().insert_category(name, Some(parent)).await?;
            self.store().attach_category(day_id, &category).await?;
        }

        Ok(())
    }
}

pub fn test_config(dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.join("signup.db").display()),
            max_connections: 1,
        },
        logging: LoggingConfig::default(),
        roster: CategoryMapping::default(),
        schedule: ScheduleConfig::default(),
    }
}

/// Migrates a fresh database under `dir` and registers the two role
/// categories as the roster mapping
pub async fn setup_test_app(dir: &Path) -> anyhow::Result<TestApp> {
    let mut config = test_config(dir);
    let pool = signup::create_pool(&config.database.url, 1).await?;
    signup::db::migrate(&pool).await?;

    let store = SqliteStore::single(pool.clone());
    config.roster = CategoryMapping {
        youth_category: store.insert_category("Students", None).await?,
        volunteers_category: store.insert_category("Volunteers", None).await?,
    };

    let state = AppState {
        config,
        store,
        pool,
    };

    Ok(TestApp {
        router: signup::routes::router(state.clone()),
        state,
    })
}
