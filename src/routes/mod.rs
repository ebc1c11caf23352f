use axum::{Router, response::IntoResponse, routing::post};
use signup_schedule::SqliteStore;
use sqlx::SqlitePool;

use crate::template::{NotFoundTemplate, Template};

mod admin;
mod health;
mod schedule;

use axum::routing::get;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub store: SqliteStore,
    pub pool: SqlitePool,
}

pub async fn fallback(template: Template) -> impl IntoResponse {
    template.render_with_status(axum::http::StatusCode::NOT_FOUND, NotFoundTemplate)
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/schedule", get(schedule::page))
        .route("/schedule/{date}", get(schedule::day))
        .route("/admin/schedule/{date}", post(admin::get_or_create))
        .route("/admin/schedule/{id}/normalize", post(admin::normalize))
        .fallback(fallback)
        .with_state(app_state)
}
