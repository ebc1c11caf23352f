use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use signup_shared::Error;

use crate::{
    routes::AppState,
    template::{NOT_FOUND, SERVER_ERROR_MESSAGE},
};

fn error_response(err: Error) -> Response {
    match err {
        Error::NotFound => (StatusCode::NOT_FOUND, Json(json!({"error": NOT_FOUND}))).into_response(),
        Error::Conflict(_) => (
            StatusCode::CONFLICT,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
        err => {
            tracing::error!(err = %err, "admin schedule request failed");

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": SERVER_ERROR_MESSAGE})),
            )
                .into_response()
        }
    }
}

/// POST /admin/schedule/{date} - Schedule day for a date, created when missing
#[tracing::instrument(skip_all, fields(date = %date))]
pub async fn get_or_create(State(app): State<AppState>, Path((date,)): Path<(String,)>) -> Response {
    match signup_schedule::get_or_create(&app.store, &date, &app.config.schedule.author).await {
        Ok(Some(id)) => (StatusCode::OK, Json(json!({"id": id, "date": date}))).into_response(),
        Ok(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": format!("{date} is not a YYYY-MM-DD date")})),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /admin/schedule/{id}/normalize - Runs the save hook on a record
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn normalize(State(app): State<AppState>, Path((id,)): Path<(String,)>) -> Response {
    match signup_schedule::normalize_title(&app.store, &id).await {
        Ok(changed) => (StatusCode::OK, Json(json!({"id": id, "changed": changed}))).into_response(),
        Err(err) => error_response(err),
    }
}
