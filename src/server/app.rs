use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{account, athletes, health};
use crate::services::auth::{CredentialStore, SessionService};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sessions: SessionService,
    pub credentials: Arc<dyn CredentialStore>,
}

pub async fn create_app(
    db: DatabaseConnection,
    credentials: Arc<dyn CredentialStore>,
    cors_origin: Option<&str>,
) -> Result<Router> {
    let state = AppState {
        sessions: SessionService::new(db.clone()),
        db,
        credentials,
    };

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // Athlete browsing
        .route("/athletes", get(athletes::list_athletes))
        .route("/athletes/:id/competitions", get(athletes::competition_history))
        .route(
            "/athletes/:id/competition-details",
            get(athletes::competition_details),
        )
        // Gated write path
        .route(
            "/athletes/:id/add-event",
            get(athletes::add_event_form).post(athletes::add_event),
        )
        // Session gate
        .route("/account/login", get(account::login_form).post(account::login))
        .route("/account/logout", post(account::logout))
        // Add middleware
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}
