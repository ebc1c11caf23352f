use sqlx::prelude::FromRow;
use strum::{AsRefStr, Display, EnumString};

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum PostKind {
    #[default]
    ScheduleDay,
    Page,
    Post,
}

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum PostStatus {
    Publish,
    #[default]
    Future,
    Draft,
    AutoDraft,
}

/// Statuses a schedule day is visible under
pub const SCHEDULED: [PostStatus; 2] = [PostStatus::Publish, PostStatus::Future];

pub const PLACEHOLDER_TITLE: &str = "Auto Draft";

#[derive(Default, Debug, Clone, FromRow)]
pub struct Post {
    pub id: String,
    pub kind: sqlx::types::Text<PostKind>,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: sqlx::types::Text<PostStatus>,
    pub author_id: String,
    pub date: String,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl Post {
    pub fn is_schedule_day(&self) -> bool {
        self.kind.0 == PostKind::ScheduleDay
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub kind: PostKind,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub status: PostStatus,
    pub author_id: String,
    pub date: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.slug.is_none() && self.content.is_none() && self.status.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inserted {
    Created(String),
    /// Another record already holds this kind and slug
    Conflict,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}
