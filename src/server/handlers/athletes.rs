use axum::extract::{Form, Path, Query, State};
use axum::response::{Json, Redirect};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::server::app::AppState;
use crate::server::session::CurrentUser;
use crate::services::athletes::{self, AthletePage, DEFAULT_PAGE_SIZE};
use crate::services::competitions::{
    self, CompetitionHistory, GamesSummary, ResultFormView, ResultSubmission,
};

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "default_page")]
    page: i64,
    // The original surface spelled this pageSize; both spellings are accepted.
    #[serde(default = "default_page_size", alias = "pageSize")]
    page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

pub async fn list_athletes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<AthletePage>, AppError> {
    let page = athletes::list_athletes(&state.db, params.page, params.page_size).await?;
    Ok(Json(page))
}

pub async fn competition_history(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CompetitionHistory>, AppError> {
    let history = competitions::competition_history(&state.db, id).await?;
    Ok(Json(history))
}

pub async fn competition_details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GamesSummary>, AppError> {
    let summary = competitions::games_summary(&state.db, id).await?;
    Ok(Json(summary))
}

pub async fn add_event_form(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<ResultFormView>, AppError> {
    let form = competitions::result_form(&state.db, id).await?;
    Ok(Json(form))
}

pub async fn add_event(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i32>,
    Form(submission): Form<ResultSubmission>,
) -> Result<Redirect, AppError> {
    competitions::record_result(&state.db, id, &submission).await?;
    info!("{} added a result for athlete {}", user.email, id);

    Ok(Redirect::to(&format!("/athletes/{}/competitions", id)))
}
