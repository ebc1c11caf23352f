use signup::cli;
use signup_schedule::{PostStatus, PostUpdate, Role, SqliteStore, Store};
use temp_dir::TempDir;

mod helpers;
use helpers::test_config;

async fn migrated(dir: &TempDir) -> (signup::Config, SqliteStore) {
    let config = test_config(dir.path());
    let pool = signup::create_pool(&config.database.url, 1).await.unwrap();
    signup::db::migrate(&pool).await.unwrap();

    (config, SqliteStore::single(pool))
}

#[tokio::test]
async fn test_day_create_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let (config, store) = migrated(&dir).await;

    let first = cli::day::create(&config, "2024-06-12", None).await.unwrap();
    let second = cli::day::create(&config, "2024-06-12", Some("someone".to_owned()))
        .await
        .unwrap();
    assert_eq!(first, second);

    let post = store.get(&first).await.unwrap().unwrap();
    assert_eq!(post.author_id, "admin");
    assert_eq!(post.status.0, PostStatus::Publish);

    let future = cli::day::create(&config, "2999-01-01", Some("someone".to_owned()))
        .await
        .unwrap();
    let post = store.get(&future).await.unwrap().unwrap();
    assert_eq!(post.author_id, "someone");
    assert_eq!(post.status.0, PostStatus::Future);

    assert!(cli::day::create(&config, "12/06/2024", None).await.is_err());
}

#[tokio::test]
async fn test_day_limits_and_tags() {
    let dir = TempDir::new().unwrap();
    let (config, store) = migrated(&dir).await;

    let youth = cli::category::add(&config, "Students", None).await.unwrap();
    let ana = cli::category::add(&config, "Ana", Some(&youth)).await.unwrap();
    let id = cli::day::create(&config, "2024-06-12", None).await.unwrap();

    cli::day::limits(&config, "2024-06-12", Some(10), None)
        .await
        .unwrap();
    cli::day::tag(&config, "2024-06-12", &ana).await.unwrap();

    assert_eq!(
        store.meta(&id, Role::Youth.limit_key()).await.unwrap(),
        Some("10".to_owned())
    );
    assert_eq!(
        store.meta(&id, Role::Volunteers.limit_key()).await.unwrap(),
        None
    );

    let categories = store.categories(&id).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Ana");
    assert_eq!(categories[0].parent_id.as_deref(), Some(youth.as_str()));

    assert!(
        cli::day::limits(&config, "2024-06-13", Some(1), None)
            .await
            .is_err()
    );
    assert!(cli::day::tag(&config, "2024-06-13", &ana).await.is_err());
}

#[tokio::test]
async fn test_day_normalize() {
    let dir = TempDir::new().unwrap();
    let (config, store) = migrated(&dir).await;

    let id = cli::day::create(&config, "2024-06-12", None).await.unwrap();
    store
        .update(
            &id,
            PostUpdate {
                title: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(cli::day::normalize(&config, &id).await.unwrap());
    assert!(!cli::day::normalize(&config, &id).await.unwrap());
    assert!(cli::day::normalize(&config, "missing").await.is_err());

    let post = store.get(&id).await.unwrap().unwrap();
    assert_eq!(post.title, "2024-06-12");
}
