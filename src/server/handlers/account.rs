use axum::extract::{Form, State};
use axum::http::header::{HeaderMap, COOKIE, SET_COOKIE};
use axum::response::{IntoResponse, Json, Redirect};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::errors::AppError;
use crate::server::app::AppState;
use crate::server::session::{clear_session_cookie, extract_session_token, session_cookie};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Shape of the login form, for clients that render it.
pub async fn login_form() -> Json<serde_json::Value> {
    Json(json!({
        "fields": ["email", "password"],
        "action": "/account/login",
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    if !state.credentials.verify(&form.email, &form.password) {
        info!("Rejected login attempt for {}", form.email);
        return Err(AppError::InvalidCredentials);
    }

    let session = state.sessions.open(&form.email).await?;
    info!("{} logged in", session.account_email);

    Ok((
        [(SET_COOKIE, session_cookie(&session.token))],
        Redirect::to("/athletes"),
    ))
}

/// Clears the session wherever one exists; succeeds for anonymous callers
/// too, since the outcome they asked for already holds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = headers
        .get(COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(extract_session_token);

    if let Some(token) = token {
        state.sessions.revoke(token).await?;
    }

    Ok((
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to("/athletes"),
    ))
}
