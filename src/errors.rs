//! Application error taxonomy
//!
//! Every fallible operation funnels into [`AppError`], which carries enough
//! structure to map onto an HTTP status and a stable machine-readable code.
//! Backend faults keep their detail in the server log; the response body only
//! ever exposes the code and a generic message.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Client input failed validation; `fields` maps field name to message
    #[error("Validation failed")]
    Validation { fields: BTreeMap<String, String> },

    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },

    /// Credential pair did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request needs an authenticated session
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Backend database fault
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), message.into());
        AppError::Validation { fields }
    }

    pub fn not_found(entity: &'static str, id: i32) -> Self {
        AppError::NotFound { entity, id }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::InvalidCredentials | AppError::AuthenticationRequired => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_FAILED",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Message safe to put in a response body. Database detail stays out.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Database(err) = &self {
            tracing::error!("database fault: {err}");
        }

        let mut body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.client_message(),
            }
        });
        if let AppError::Validation { fields } = &self {
            body["error"]["fields"] = json!(fields);
        }

        (self.status_code(), Json(body)).into_response()
    }
}
