//! Service-level tests against a throwaway sqlite database: query windows,
//! reference-row resolution on the write path, and session lifecycle.

use anyhow::Result;
use olympiad::database::connection::setup_database;
use olympiad::database::entities::{
    competitor_events, events, games, games_competitors, medals, people, sports,
};
use olympiad::database::seed_data::seed_reference_data;
use olympiad::services::athletes::list_athletes;
use olympiad::services::auth::SessionService;
use olympiad::services::competitions::{
    competition_history, record_result, ResultSubmission,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Set,
};
use tempfile::NamedTempFile;

async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

async fn insert_named_person(db: &DatabaseConnection, name: &str) -> Result<i32> {
    let person = people::ActiveModel {
        full_name: Set(Some(name.to_string())),
        gender: Set(None),
        height: Set(None),
        weight: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(person.id)
}

fn judo_submission() -> ResultSubmission {
    ResultSubmission {
        sport_name: "Judo".to_string(),
        event_name: "Judo Men's Half-Lightweight".to_string(),
        olympics_name: "2016 Summer".to_string(),
        age: Some(24),
        medal_id: None,
    }
}

#[tokio::test]
async fn test_pagination_windows_cover_the_set_in_order() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;

    for name in ["Delta", "Bravo", "Echo", "Alpha", "Charlie"] {
        insert_named_person(&db, name).await?;
    }

    let mut collected = Vec::new();
    for page in 1..=3 {
        let result = list_athletes(&db, page, 2).await?;
        assert!(result.athletes.len() <= 2);
        collected.extend(result.athletes.into_iter().map(|a| a.full_name));
    }

    assert_eq!(collected, vec!["Alpha", "Bravo", "Charlie", "Delta", "Echo"]);

    // Past the end: a valid but empty window.
    let past_end = list_athletes(&db, 4, 2).await?;
    assert!(past_end.athletes.is_empty());
    assert_eq!(past_end.total_pages, 3);

    Ok(())
}

#[tokio::test]
async fn test_invalid_paging_is_rejected_without_querying() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;

    assert!(list_athletes(&db, 0, 10).await.is_err());
    assert!(list_athletes(&db, 1, 0).await.is_err());

    Ok(())
}

#[tokio::test]
async fn test_record_result_creates_missing_reference_rows() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let person = insert_named_person(&db, "Fresh Start").await?;

    record_result(&db, person, &judo_submission()).await?;

    assert_eq!(sports::Entity::find().count(&db).await?, 1);
    assert_eq!(events::Entity::find().count(&db).await?, 1);
    assert_eq!(games::Entity::find().count(&db).await?, 1);
    assert_eq!(games_competitors::Entity::find().count(&db).await?, 1);
    assert_eq!(competitor_events::Entity::find().count(&db).await?, 1);

    let event = events::Entity::find().one(&db).await?.unwrap();
    let sport = sports::Entity::find().one(&db).await?.unwrap();
    assert_eq!(event.sport_id, Some(sport.id));

    Ok(())
}

#[tokio::test]
async fn test_record_result_reuses_existing_reference_rows() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let person = insert_named_person(&db, "Repeat Entrant").await?;

    record_result(&db, person, &judo_submission()).await?;
    record_result(&db, person, &judo_submission()).await?;

    // Same names resolve to the same rows; only the result itself is new.
    assert_eq!(sports::Entity::find().count(&db).await?, 1);
    assert_eq!(events::Entity::find().count(&db).await?, 1);
    assert_eq!(games::Entity::find().count(&db).await?, 1);
    assert_eq!(games_competitors::Entity::find().count(&db).await?, 1);
    assert_eq!(competitor_events::Entity::find().count(&db).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_record_result_rejects_unknown_athlete() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;

    let err = record_result(&db, 12345, &judo_submission()).await.unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");

    Ok(())
}

#[tokio::test]
async fn test_record_result_rejects_unknown_medal_without_writing() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let person = insert_named_person(&db, "Careful Entrant").await?;

    let mut submission = judo_submission();
    submission.medal_id = Some(777);

    let err = record_result(&db, person, &submission).await.unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_FAILED");
    assert_eq!(competitor_events::Entity::find().count(&db).await?, 0);
    assert_eq!(sports::Entity::find().count(&db).await?, 0);

    Ok(())
}

#[tokio::test]
async fn test_history_drops_results_without_a_games_link() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let person = insert_named_person(&db, "Orphaned Result").await?;

    // Dataset imports can carry dangling games references; build one with
    // constraint checks off for the batch, the way a raw import would.
    db.execute_unprepared(&format!(
        "PRAGMA foreign_keys = OFF; \
         INSERT INTO games_competitors (id, person_id, games_id, age) VALUES (901, {person}, 4242, 30); \
         INSERT INTO competitor_events (id, competitor_id, event_id, medal_id) VALUES (902, 901, NULL, NULL);"
    ))
    .await?;

    let history = competition_history(&db, person).await?;
    assert!(history.competitions.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_seeded_dataset_serves_the_listing() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    seed_reference_data(&db).await?;
    // Idempotent on a second call.
    seed_reference_data(&db).await?;

    assert_eq!(medals::Entity::find().count(&db).await?, 4);

    let page = list_athletes(&db, 1, 20).await?;
    assert_eq!(page.total_athletes, 4);

    // Adam Nowak's duplicate sprint pair collapses in both views.
    let nowak = page
        .athletes
        .iter()
        .find(|a| a.full_name == "Adam Nowak")
        .expect("seeded athlete");
    assert_eq!(nowak.gold_medals, 1);
    assert_eq!(nowak.silver_medals, 1);
    assert_eq!(nowak.competitions_count, 3);

    let history = competition_history(&db, nowak.id).await?;
    assert_eq!(history.competitions.len(), 3);

    Ok(())
}

#[tokio::test]
async fn test_session_lifecycle() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let sessions = SessionService::new(db.clone());

    let session = sessions.open("admin@olympiad.local").await?;
    assert!(!session.token.is_empty());

    let resolved = sessions.resolve(&session.token).await?;
    let resolved = resolved.expect("live session resolves");
    assert_eq!(resolved.account_email, "admin@olympiad.local");
    // Sliding renewal never moves the expiry backwards.
    assert!(resolved.expires_at >= session.expires_at);

    sessions.revoke(&session.token).await?;
    assert!(sessions.resolve(&session.token).await?.is_none());

    // Revoking again is a quiet no-op.
    sessions.revoke(&session.token).await?;

    Ok(())
}

#[tokio::test]
async fn test_expired_session_is_removed_on_resolve() -> Result<()> {
    let (db, _guard) = setup_test_db().await?;
    let sessions = SessionService::new(db.clone());

    let session = sessions.open("admin@olympiad.local").await?;

    let mut stale: olympiad::database::entities::sessions::ActiveModel = session.clone().into();
    stale.expires_at = Set(chrono::Utc::now() - chrono::Duration::minutes(1));
    stale.update(&db).await?;

    assert!(sessions.resolve(&session.token).await?.is_none());

    let remaining = olympiad::database::entities::sessions::Entity::find()
        .filter(olympiad::database::entities::sessions::Column::Token.eq(session.token.clone()))
        .count(&db)
        .await?;
    assert_eq!(remaining, 0);

    Ok(())
}
