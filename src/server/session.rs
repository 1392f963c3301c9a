//! Session cookie plumbing.
//!
//! The cookie carries nothing but the opaque session token; everything else
//! about the session lives in the database. None of the handlers touch the
//! Cookie header directly — they take a [`CurrentUser`] parameter and the
//! extractor does the lookup and the sliding renewal.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use crate::database::entities::sessions::SESSION_TTL_MINUTES;
use crate::errors::AppError;
use crate::server::app::AppState;

pub const SESSION_COOKIE: &str = "olympiad_session";

/// Set-Cookie value carrying a fresh or renewed session token.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL_MINUTES * 60
    )
}

/// Set-Cookie value that removes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Pull the session token out of a Cookie header value, if present.
pub fn extract_session_token(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
        .filter(|token| !token.is_empty())
}

/// The authenticated account behind the request. Extraction fails with a 401
/// when there is no live session; a live session gets its expiry extended as
/// a side effect.
pub struct CurrentUser {
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_session_token)
            .ok_or(AppError::AuthenticationRequired)?;

        let session = state
            .sessions
            .resolve(token)
            .await?
            .ok_or(AppError::AuthenticationRequired)?;

        Ok(CurrentUser {
            email: session.account_email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_round_trip() {
        let cookie = session_cookie("abc-123");
        // The Set-Cookie value before the attributes is what clients echo back.
        let pair = cookie.split(';').next().unwrap();
        assert_eq!(extract_session_token(pair), Some("abc-123"));
    }

    #[test]
    fn test_extracts_among_other_cookies() {
        let header = format!("theme=dark; {}=tok-42; lang=en", SESSION_COOKIE);
        assert_eq!(extract_session_token(&header), Some("tok-42"));
    }

    #[test]
    fn test_ignores_prefixed_cookie_names() {
        let header = format!("{}_old=stale", SESSION_COOKIE);
        assert_eq!(extract_session_token(&header), None);
    }

    #[test]
    fn test_empty_token_is_absent() {
        let header = format!("{}=", SESSION_COOKIE);
        assert_eq!(extract_session_token(&header), None);
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
