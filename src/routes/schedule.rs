use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use signup_schedule::Store;
use signup_shared::date;

use crate::{routes::AppState, template::Template};

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub schedule_day: Option<String>,
}

#[derive(askama::Template)]
#[template(path = "schedule.html")]
pub struct ScheduleTemplate {
    pub monday: String,
    pub fragment: String,
}

#[tracing::instrument(skip_all, fields(schedule_day = ?query.schedule_day))]
pub async fn page(
    template: Template,
    State(app): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> impl IntoResponse {
    let week = crate::try_page_response!(
        crate::view::render_week(
            &app.store,
            &app.config.roster,
            query.schedule_day.as_deref(),
            date::today(),
        ),
        template
    );

    template
        .render(ScheduleTemplate {
            monday: week.monday,
            fragment: week.html,
        })
        .into_response()
}

#[derive(askama::Template)]
#[template(path = "day.html")]
pub struct DayTemplate {
    pub title: String,
    pub pretty: String,
    pub monday: String,
    pub content: String,
    pub summary: String,
}

#[tracing::instrument(skip_all, fields(day = %day))]
pub async fn day(
    template: Template,
    State(app): State<AppState>,
    Path((day,)): Path<(String,)>,
) -> impl IntoResponse {
    let id = crate::try_page_response!(opt: signup_schedule::find(&app.store, &day), template);
    let post = crate::try_page_response!(opt: app.store.get(&id), template);

    // Content goes through the template escaping, only the summary is markup
    let summary = crate::try_page_response!(
        crate::view::decorate_day(&app.store, &app.config.roster, &id, ""),
        template
    );

    let parsed = date::parse(&post.date);

    template
        .render(DayTemplate {
            pretty: parsed.map(date::pretty).unwrap_or_else(|| post.date.to_owned()),
            monday: parsed
                .and_then(date::monday_of)
                .map(date::format)
                .unwrap_or_else(|| post.date.to_owned()),
            title: post.title,
            content: post.content,
            summary,
        })
        .into_response()
}
