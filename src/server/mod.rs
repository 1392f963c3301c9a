pub mod app;
pub mod handlers;
pub mod session;

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use sea_orm_migration::prelude::*;
use tracing::info;

use crate::config::AdminCredentials;
use crate::database::{connection::*, migrations::Migrator, seed_data};
use crate::services::auth::{CredentialStore, StaticCredentials};

#[derive(Subcommand, Debug)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

pub async fn start_server(
    port: u16,
    database_path: &str,
    cors_origin: Option<&str>,
    seed: bool,
    admin: AdminCredentials,
) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    // Run migrations
    setup_database(&db).await?;
    info!("Database migrations completed");

    if seed {
        seed_data::seed_reference_data(&db).await?;
    }

    let credentials: Arc<dyn CredentialStore> =
        Arc::new(StaticCredentials::new(admin.email, &admin.password)?);

    let app = app::create_app(db, credentials, cors_origin).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                              - Health check");
    info!("  /athletes                            - Paginated athlete list");
    info!("  /athletes/:id/competitions           - Competition history");
    info!("  /athletes/:id/competition-details    - Per-games summary");
    info!("  /athletes/:id/add-event              - Record a result (login required)");
    info!("  /account/login  /account/logout      - Session gate");
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}

pub async fn seed_database(database_path: &str) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;
    seed_data::seed_reference_data(&db).await?;

    Ok(())
}
