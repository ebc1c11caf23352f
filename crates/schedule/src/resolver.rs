use signup_shared::{Error, Result, date};

use crate::{
    Inserted, NewPost, PLACEHOLDER_TITLE, PostKind, PostStatus, PostUpdate, SCHEDULED, Store,
};

/// Schedule day holding the given date, among published and future records
pub async fn find<S: Store + ?Sized>(store: &S, date: &str) -> Result<Option<String>> {
    if !date::is_valid(date) {
        return Ok(None);
    }

    store
        .find_by_slug(PostKind::ScheduleDay, date, &SCHEDULED)
        .await
}

/// Creates the schedule day for `date`.
///
/// Days that are already behind us are published right away, the others are
/// scheduled. A taken date surfaces as [`Error::Conflict`].
#[tracing::instrument(skip(store))]
pub async fn create<S: Store + ?Sized>(
    store: &S,
    date: &str,
    author: &str,
) -> Result<Option<String>> {
    let Some(day) = date::parse(date) else {
        return Ok(None);
    };

    let status = if day > date::today() {
        PostStatus::Future
    } else {
        PostStatus::Publish
    };

    let inserted = store
        .insert(NewPost {
            kind: PostKind::ScheduleDay,
            slug: date.to_owned(),
            title: date.to_owned(),
            content: String::new(),
            status,
            author_id: author.to_owned(),
            date: date.to_owned(),
        })
        .await?;

    match inserted {
        Inserted::Created(id) => {
            tracing::info!(id = %id, %status, "schedule day created");

            Ok(Some(id))
        }
        Inserted::Conflict => Err(Error::Conflict(format!("schedule day {date}"))),
    }
}

/// Existing schedule day for `date`, created when missing.
///
/// Concurrent callers race on the unique `(kind, slug)` insert; the loser
/// reads back the winner's record.
pub async fn get_or_create<S: Store + ?Sized>(
    store: &S,
    date: &str,
    author: &str,
) -> Result<Option<String>> {
    if !date::is_valid(date) {
        return Ok(None);
    }

    if let Some(id) = find(store, date).await? {
        return Ok(Some(id));
    }

    match create(store, date, author).await {
        Err(Error::Conflict(what)) => {
            tracing::warn!(date, "schedule day created concurrently, reading it back");

            match find(store, date).await? {
                Some(id) => Ok(Some(id)),
                None => Err(Error::Conflict(what)),
            }
        }
        result => result,
    }
}

/// Save hook: aligns a schedule day's title and slug with its date.
///
/// Blank, placeholder and mismatched titles are rewritten, as is a slug
/// that drifted from the date. Returns whether the record changed.
#[tracing::instrument(skip(store))]
pub async fn normalize_title<S: Store + ?Sized>(store: &S, id: &str) -> Result<bool> {
    let Some(post) = store.get(id).await? else {
        return Err(Error::NotFound);
    };

    if !post.is_schedule_day() {
        return Ok(false);
    }

    let stale_title = post.title.trim().is_empty()
        || post.title == PLACEHOLDER_TITLE
        || post.title != post.date;

    if !stale_title && post.slug == post.date {
        return Ok(false);
    }

    store
        .update(
            id,
            PostUpdate {
                title: Some(post.date.to_owned()),
                slug: Some(post.date.to_owned()),
                ..Default::default()
            },
        )
        .await?;

    tracing::info!(from = %post.title, to = %post.date, "schedule day title normalized");

    Ok(true)
}
