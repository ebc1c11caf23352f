use signup_shared::Result;

use crate::{Category, Inserted, NewPost, Post, PostKind, PostStatus, PostUpdate};

/// Content storage consumed by the schedule.
///
/// Records, their categories and metadata live behind this trait so the
/// resolver and roster logic never touch SQL directly.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn find_by_slug(
        &self,
        kind: PostKind,
        slug: &str,
        statuses: &[PostStatus],
    ) -> Result<Option<String>>;

    /// Conditional insert, a taken `(kind, slug)` pair is reported as
    /// [`Inserted::Conflict`] instead of an error.
    async fn insert(&self, post: NewPost) -> Result<Inserted>;

    async fn update(&self, id: &str, update: PostUpdate) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<Post>>;

    async fn categories(&self, id: &str) -> Result<Vec<Category>>;

    async fn meta(&self, id: &str, key: &str) -> Result<Option<String>>;

    async fn set_meta(&self, id: &str, key: &str, value: &str) -> Result<()>;

    async fn insert_category(&self, name: &str, parent_id: Option<&str>) -> Result<String>;

    async fn attach_category(&self, id: &str, category_id: &str) -> Result<()>;
}
