use signup_schedule::{
    Category, Inserted, NewPost, PLACEHOLDER_TITLE, Post, PostKind, PostStatus, PostUpdate,
    SqliteStore, Store,
};
use signup_shared::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_find_ignores_invalid_and_missing_dates() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    assert_eq!(signup_schedule::find(&state.store, "2024-06-10").await?, None);
    assert_eq!(signup_schedule::find(&state.store, "2024-6-10").await?, None);
    assert_eq!(
        signup_schedule::get_or_create(&state.store, "10/06/2024", "admin").await?,
        None
    );
    assert_eq!(
        signup_schedule::create(&state.store, "2024-02-30", "admin").await?,
        None
    );

    Ok(())
}

#[tokio::test]
async fn test_create_sets_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let past = signup_schedule::create(&state.store, "2024-06-10", "admin")
        .await?
        .unwrap();
    let future = signup_schedule::create(&state.store, "2999-06-10", "admin")
        .await?
        .unwrap();

    let post = state.store.get(&past).await?.unwrap();
    assert_eq!(post.kind.0, PostKind::ScheduleDay);
    assert_eq!(post.title, "2024-06-10");
    assert_eq!(post.slug, "2024-06-10");
    assert_eq!(post.date, "2024-06-10");
    assert_eq!(post.content, "");
    assert_eq!(post.author_id, "admin");
    assert_eq!(post.status.0, PostStatus::Publish);

    let post = state.store.get(&future).await?.unwrap();
    assert_eq!(post.status.0, PostStatus::Future);

    assert_eq!(
        signup_schedule::find(&state.store, "2024-06-10").await?,
        Some(past)
    );
    assert_eq!(
        signup_schedule::find(&state.store, "2999-06-10").await?,
        Some(future)
    );

    Ok(())
}

#[tokio::test]
async fn test_create_twice_is_a_conflict() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    signup_schedule::create(&state.store, "2024-06-10", "admin").await?;
    let result = signup_schedule::create(&state.store, "2024-06-10", "admin").await;

    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn test_get_or_create_is_idempotent() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let first = signup_schedule::get_or_create(&state.store, "2024-06-12", "admin").await?;
    let second = signup_schedule::get_or_create(&state.store, "2024-06-12", "someone").await?;

    assert!(first.is_some());
    assert_eq!(first, second);

    Ok(())
}

#[tokio::test]
async fn test_get_or_create_concurrently_yields_one_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let (a, b, c) = futures::join!(
        signup_schedule::get_or_create(&state.store, "2024-06-13", "a"),
        signup_schedule::get_or_create(&state.store, "2024-06-13", "b"),
        signup_schedule::get_or_create(&state.store, "2024-06-13", "c"),
    );

    let a = a?;
    assert!(a.is_some());
    assert_eq!(a, b?);
    assert_eq!(a, c?);

    Ok(())
}

/// Misses the first lookup as if another writer inserted right after it
struct LateStore {
    inner: SqliteStore,
    missed: AtomicBool,
}

#[async_trait::async_trait]
impl Store for LateStore {
    async fn find_by_slug(
        &self,
        kind: PostKind,
        slug: &str,
        statuses: &[PostStatus],
    ) -> Result<Option<String>> {
        if !self.missed.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }

        self.inner.find_by_slug(kind, slug, statuses).await
    }

    async fn insert(&self, post: NewPost) -> Result<Inserted> {
        self.inner.insert(post).await
    }

    async fn update(&self, id: &str, update: PostUpdate) -> Result<()> {
        self.inner.update(id, update).await
    }

    async fn get(&self, id: &str) -> Result<Option<Post>> {
        self.inner.get(id).await
    }

    async fn categories(&self, id: &str) -> Result<Vec<Category>> {
        self.inner.categories(id).await
    }

    async fn meta(&self, id: &str, key: &str) -> Result<Option<String>> {
        self.inner.meta(id, key).await
    }

    async fn set_meta(&self, id: &str, key: &str, value: &str) -> Result<()> {
        self.inner.set_meta(id, key, value).await
    }

    async fn insert_category(&self, name: &str, parent_id: Option<&str>) -> Result<String> {
        self.inner.insert_category(name, parent_id).await
    }

    async fn attach_category(&self, id: &str, category_id: &str) -> Result<()> {
        self.inner.attach_category(id, category_id).await
    }
}

#[tokio::test]
async fn test_get_or_create_reads_back_the_winner() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let winner = signup_schedule::create(&state.store, "2024-06-14", "winner")
        .await?
        .unwrap();

    let store = LateStore {
        inner: state.store.clone(),
        missed: AtomicBool::new(false),
    };

    let id = signup_schedule::get_or_create(&store, "2024-06-14", "loser").await?;
    assert_eq!(id, Some(winner));

    Ok(())
}

#[tokio::test]
async fn test_get_or_create_conflicts_with_hidden_record() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    state
        .store
        .insert(NewPost {
            kind: PostKind::ScheduleDay,
            slug: "2024-06-15".to_owned(),
            title: PLACEHOLDER_TITLE.to_owned(),
            content: String::new(),
            status: PostStatus::Draft,
            author_id: "admin".to_owned(),
            date: "2024-06-15".to_owned(),
        })
        .await?;

    let result = signup_schedule::get_or_create(&state.store, "2024-06-15", "admin").await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}

#[tokio::test]
async fn test_normalize_title() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let mut ids = vec![];
    for (slug, title) in [
        ("draft-1", ""),
        ("draft-2", PLACEHOLDER_TITLE),
        ("draft-3", "Movie night"),
    ] {
        let inserted = state
            .store
            .insert(NewPost {
                kind: PostKind::ScheduleDay,
                slug: slug.to_owned(),
                title: title.to_owned(),
                content: String::new(),
                status: PostStatus::Publish,
                author_id: "admin".to_owned(),
                date: format!("2024-07-0{}", ids.len() + 1),
            })
            .await?;

        let Inserted::Created(id) = inserted else {
            panic!("slug {slug} should be free");
        };
        ids.push(id);
    }

    for (i, id) in ids.iter().enumerate() {
        assert!(signup_schedule::normalize_title(&state.store, id).await?);

        let post = state.store.get(id).await?.unwrap();
        let expected = format!("2024-07-0{}", i + 1);
        assert_eq!(post.title, expected);
        assert_eq!(post.slug, expected);
        assert!(post.updated_at.is_some());

        assert!(!signup_schedule::normalize_title(&state.store, id).await?);
    }

    assert_eq!(
        signup_schedule::find(&state.store, "2024-07-02").await?,
        Some(ids[1].to_owned())
    );

    Ok(())
}

#[tokio::test]
async fn test_normalize_title_skips_other_kinds() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    let Inserted::Created(id) = state
        .store
        .insert(NewPost {
            kind: PostKind::Page,
            slug: "about".to_owned(),
            title: "About".to_owned(),
            content: String::new(),
            status: PostStatus::Publish,
            author_id: "admin".to_owned(),
            date: "2024-06-10".to_owned(),
        })
        .await?
    else {
        panic!("page slug should be free");
    };

    assert!(!signup_schedule::normalize_title(&state.store, &id).await?);
    assert_eq!(state.store.get(&id).await?.unwrap().title, "About");

    let missing = signup_schedule::normalize_title(&state.store, "missing").await;
    assert!(matches!(missing, Err(Error::NotFound)));

    Ok(())
}

#[tokio::test]
async fn test_normalize_title_conflicts_with_taken_date() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;

    signup_schedule::create(&state.store, "2024-06-10", "admin").await?;

    let Inserted::Created(id) = state
        .store
        .insert(NewPost {
            kind: PostKind::ScheduleDay,
            slug: "auto-draft".to_owned(),
            title: PLACEHOLDER_TITLE.to_owned(),
            content: String::new(),
            status: PostStatus::AutoDraft,
            author_id: "admin".to_owned(),
            date: "2024-06-10".to_owned(),
        })
        .await?
    else {
        panic!("draft slug should be free");
    };

    let result = signup_schedule::normalize_title(&state.store, &id).await;
    assert!(matches!(result, Err(Error::Conflict(_))));

    Ok(())
}
