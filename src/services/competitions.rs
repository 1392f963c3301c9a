//! Per-athlete competition views and the add-result write path.
//!
//! History shows one row per distinct (event, games) pair; duplicate result
//! rows for the same pair collapse onto the row with the smallest id, so the
//! winner of a collision is stable across requests. Related records that are
//! missing render as placeholders, with one exception: a result whose games
//! link cannot be resolved has no place to hang in either view and is
//! dropped.

use std::collections::{BTreeMap, HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::database::entities::{
    competitor_events, events, games, games_competitors, medals, people, sports,
};
use crate::errors::AppError;

pub const UNKNOWN_SPORT: &str = "Unknown sport";
pub const UNKNOWN_EVENT: &str = "Unknown event";
pub const UNKNOWN_OLYMPICS: &str = "Unknown olympics";
pub const UNKNOWN_SEASON: &str = "Unknown season";
pub const UNKNOWN_AGE: &str = "Unknown age";
pub const NO_MEDAL: &str = "No medal";

const MAX_NAME_LENGTH: usize = 100;
const AGE_RANGE: std::ops::RangeInclusive<i32> = 1..=120;

#[derive(Debug, Serialize)]
pub struct CompetitionRow {
    pub sport_name: String,
    pub event_name: String,
    pub olympics: String,
    pub season: String,
    pub athlete_age: String,
    pub medal: String,
}

#[derive(Debug, Serialize)]
pub struct CompetitionHistory {
    pub athlete_id: i32,
    pub competitions: Vec<CompetitionRow>,
}

/// The dataset marks medal-less results as "NA"; that and outright missing
/// medals both render as the same placeholder.
fn medal_display(medal_name: Option<&str>) -> String {
    match medal_name {
        Some(name) if !name.is_empty() && name != "NA" => name.to_string(),
        _ => NO_MEDAL.to_string(),
    }
}

fn age_display(age: Option<i32>) -> String {
    age.map(|a| a.to_string())
        .unwrap_or_else(|| UNKNOWN_AGE.to_string())
}

async fn require_person(db: &DatabaseConnection, person_id: i32) -> Result<people::Model, AppError> {
    people::Entity::find_by_id(person_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::not_found("athlete", person_id))
}

pub async fn competition_history(
    db: &DatabaseConnection,
    person_id: i32,
) -> Result<CompetitionHistory, AppError> {
    require_person(db, person_id).await?;

    let competitors = games_competitors::Entity::find()
        .filter(games_competitors::Column::PersonId.eq(person_id))
        .find_also_related(games::Entity)
        .all(db)
        .await?;

    // competitor id -> (games, age at that games)
    let competitor_index: HashMap<i32, (Option<games::Model>, Option<i32>)> = competitors
        .into_iter()
        .map(|(c, g)| (c.id, (g, c.age)))
        .collect();

    if competitor_index.is_empty() {
        return Ok(CompetitionHistory {
            athlete_id: person_id,
            competitions: Vec::new(),
        });
    }

    let competitor_ids: Vec<i32> = competitor_index.keys().copied().collect();

    // Ascending id order makes the first row of each (event, games) group
    // the one that wins the collapse below.
    let results = competitor_events::Entity::find()
        .filter(competitor_events::Column::CompetitorId.is_in(competitor_ids))
        .order_by_asc(competitor_events::Column::Id)
        .find_also_related(medals::Entity)
        .all(db)
        .await?;

    let event_index = load_events(db, results.iter().filter_map(|(r, _)| r.event_id)).await?;

    let mut seen: HashSet<(Option<i32>, i32)> = HashSet::new();
    let mut competitions = Vec::new();

    for (record, medal) in results {
        let Some((games, age)) = competitor_index.get(&record.competitor_id) else {
            continue;
        };
        // No games link: nothing to report the row against.
        let Some(games) = games else {
            continue;
        };

        if !seen.insert((record.event_id, games.id)) {
            continue;
        }

        let (sport_name, event_name) = match record.event_id.and_then(|id| event_index.get(&id)) {
            Some((event, sport)) => (
                sport
                    .as_ref()
                    .map(|s| s.sport_name.clone())
                    .unwrap_or_else(|| UNKNOWN_SPORT.to_string()),
                event.event_name.clone(),
            ),
            None => (UNKNOWN_SPORT.to_string(), UNKNOWN_EVENT.to_string()),
        };

        competitions.push(CompetitionRow {
            sport_name,
            event_name,
            olympics: games.games_name.clone(),
            season: games
                .season
                .clone()
                .unwrap_or_else(|| UNKNOWN_SEASON.to_string()),
            athlete_age: age_display(*age),
            medal: medal_display(medal.as_ref().map(|m| m.medal_name.as_str())),
        });
    }

    Ok(CompetitionHistory {
        athlete_id: person_id,
        competitions,
    })
}

/// event id -> (event, its sport) for the ids that actually appear.
async fn load_events(
    db: &DatabaseConnection,
    event_ids: impl Iterator<Item = i32>,
) -> Result<HashMap<i32, (events::Model, Option<sports::Model>)>, AppError> {
    let ids: Vec<i32> = event_ids.collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = events::Entity::find()
        .filter(events::Column::Id.is_in(ids))
        .find_also_related(sports::Entity)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|(e, s)| (e.id, (e, s))).collect())
}

#[derive(Debug, Serialize)]
pub struct GamesSummaryRow {
    pub olympics: String,
    pub season: String,
    pub year: Option<i32>,
    pub athlete_age: String,
    pub events_entered: u64,
    pub gold_medals: u64,
    pub silver_medals: u64,
    pub bronze_medals: u64,
}

#[derive(Debug, Serialize)]
pub struct GamesSummary {
    pub athlete_id: i32,
    pub games: Vec<GamesSummaryRow>,
}

/// One row per games participation, aggregating what the athlete did there.
pub async fn games_summary(
    db: &DatabaseConnection,
    person_id: i32,
) -> Result<GamesSummary, AppError> {
    require_person(db, person_id).await?;

    let competitors = games_competitors::Entity::find()
        .filter(games_competitors::Column::PersonId.eq(person_id))
        .order_by_asc(games_competitors::Column::Id)
        .find_also_related(games::Entity)
        .all(db)
        .await?;

    if competitors.is_empty() {
        return Ok(GamesSummary {
            athlete_id: person_id,
            games: Vec::new(),
        });
    }

    let competitor_ids: Vec<i32> = competitors.iter().map(|(c, _)| c.id).collect();

    let results = competitor_events::Entity::find()
        .filter(competitor_events::Column::CompetitorId.is_in(competitor_ids))
        .find_also_related(medals::Entity)
        .all(db)
        .await?;

    #[derive(Default)]
    struct GamesTally {
        events: HashSet<Option<i32>>,
        gold: u64,
        silver: u64,
        bronze: u64,
    }

    let mut tallies: HashMap<i32, GamesTally> = HashMap::new();
    for (record, medal) in results {
        let tally = tallies.entry(record.competitor_id).or_default();
        tally.events.insert(record.event_id);
        match medal.as_ref().map(|m| m.medal_name.as_str()) {
            Some("Gold") => tally.gold += 1,
            Some("Silver") => tally.silver += 1,
            Some("Bronze") => tally.bronze += 1,
            _ => {}
        }
    }

    let rows = competitors
        .into_iter()
        .map(|(competitor, games)| {
            let tally = tallies.remove(&competitor.id).unwrap_or_default();
            let (olympics, season, year) = match games {
                Some(g) => (
                    g.games_name,
                    g.season.unwrap_or_else(|| UNKNOWN_SEASON.to_string()),
                    g.year,
                ),
                None => (
                    UNKNOWN_OLYMPICS.to_string(),
                    UNKNOWN_SEASON.to_string(),
                    None,
                ),
            };

            GamesSummaryRow {
                olympics,
                season,
                year,
                athlete_age: age_display(competitor.age),
                events_entered: tally.events.len() as u64,
                gold_medals: tally.gold,
                silver_medals: tally.silver,
                bronze_medals: tally.bronze,
            }
        })
        .collect();

    Ok(GamesSummary {
        athlete_id: person_id,
        games: rows,
    })
}

#[derive(Debug, Serialize)]
pub struct MedalOption {
    pub id: i32,
    pub medal_name: String,
}

#[derive(Debug, Serialize)]
pub struct ResultFormView {
    pub athlete_id: i32,
    pub athlete_name: String,
    pub medals: Vec<MedalOption>,
}

/// Prefill payload for the add-result form: who the record is for and the
/// selectable medal classifications.
pub async fn result_form(
    db: &DatabaseConnection,
    person_id: i32,
) -> Result<ResultFormView, AppError> {
    let person = require_person(db, person_id).await?;

    let medal_options = medals::Entity::find()
        .order_by_asc(medals::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|m| MedalOption {
            id: m.id,
            medal_name: m.medal_name,
        })
        .collect();

    Ok(ResultFormView {
        athlete_id: person_id,
        athlete_name: person
            .full_name
            .unwrap_or_else(|| "Unknown name".to_string()),
        medals: medal_options,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultSubmission {
    pub sport_name: String,
    pub event_name: String,
    pub olympics_name: String,
    pub age: Option<i32>,
    pub medal_id: Option<i32>,
}

fn validate_name(errors: &mut BTreeMap<String, String>, field: &'static str, value: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field.to_string(), "This field is required".to_string());
    } else if trimmed.chars().count() > MAX_NAME_LENGTH {
        errors.insert(
            field.to_string(),
            format!("At most {} characters allowed", MAX_NAME_LENGTH),
        );
    }
}

/// Field-level checks on the submission; every violation is reported, not
/// just the first one encountered.
fn validate_submission(submission: &ResultSubmission) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    validate_name(&mut errors, "sport_name", &submission.sport_name);
    validate_name(&mut errors, "event_name", &submission.event_name);
    validate_name(&mut errors, "olympics_name", &submission.olympics_name);

    match submission.age {
        None => {
            errors.insert("age".to_string(), "This field is required".to_string());
        }
        Some(age) if !AGE_RANGE.contains(&age) => {
            errors.insert(
                "age".to_string(),
                format!(
                    "Age must be between {} and {}",
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ),
            );
        }
        Some(_) => {}
    }

    errors
}

/// Record a new competition result for an athlete. Sport, event and games
/// rows are resolved by exact name and created when absent; the result row
/// itself is persisted immediately.
pub async fn record_result(
    db: &DatabaseConnection,
    person_id: i32,
    submission: &ResultSubmission,
) -> Result<competitor_events::Model, AppError> {
    require_person(db, person_id).await?;

    let mut errors = validate_submission(submission);

    if let Some(medal_id) = submission.medal_id {
        let known = medals::Entity::find_by_id(medal_id).one(db).await?;
        if known.is_none() {
            errors.insert("medal_id".to_string(), "Unknown medal".to_string());
        }
    }

    if !errors.is_empty() {
        return Err(AppError::Validation { fields: errors });
    }

    let sport_id = resolve_sport(db, submission.sport_name.trim()).await?;
    let event_id = resolve_event(db, sport_id, submission.event_name.trim()).await?;
    let games_id = resolve_games(db, submission.olympics_name.trim()).await?;
    let competitor_id = resolve_competitor(db, person_id, games_id, submission.age).await?;

    let record = competitor_events::ActiveModel {
        competitor_id: Set(competitor_id),
        event_id: Set(Some(event_id)),
        medal_id: Set(submission.medal_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Recorded result {} for athlete {} ({} / {})",
        record.id,
        person_id,
        submission.sport_name.trim(),
        submission.event_name.trim()
    );

    Ok(record)
}

async fn resolve_sport(db: &DatabaseConnection, name: &str) -> Result<i32, AppError> {
    let existing = sports::Entity::find()
        .filter(sports::Column::SportName.eq(name))
        .one(db)
        .await?;

    if let Some(sport) = existing {
        return Ok(sport.id);
    }

    let sport = sports::ActiveModel {
        sport_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(sport.id)
}

async fn resolve_event(db: &DatabaseConnection, sport_id: i32, name: &str) -> Result<i32, AppError> {
    let existing = events::Entity::find()
        .filter(events::Column::EventName.eq(name))
        .one(db)
        .await?;

    if let Some(event) = existing {
        return Ok(event.id);
    }

    let event = events::ActiveModel {
        sport_id: Set(Some(sport_id)),
        event_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(event.id)
}

async fn resolve_games(db: &DatabaseConnection, name: &str) -> Result<i32, AppError> {
    let existing = games::Entity::find()
        .filter(games::Column::GamesName.eq(name))
        .one(db)
        .await?;

    if let Some(games) = existing {
        return Ok(games.id);
    }

    let games = games::ActiveModel {
        games_name: Set(name.to_string()),
        season: Set(None),
        year: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(games.id)
}

/// The (person, games) participation link; the submitted age only lands when
/// the link is first created.
async fn resolve_competitor(
    db: &DatabaseConnection,
    person_id: i32,
    games_id: i32,
    age: Option<i32>,
) -> Result<i32, AppError> {
    let existing = games_competitors::Entity::find()
        .filter(games_competitors::Column::PersonId.eq(person_id))
        .filter(games_competitors::Column::GamesId.eq(games_id))
        .one(db)
        .await?;

    if let Some(competitor) = existing {
        return Ok(competitor.id);
    }

    let competitor = games_competitors::ActiveModel {
        person_id: Set(person_id),
        games_id: Set(games_id),
        age: Set(age),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(competitor.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ResultSubmission {
        ResultSubmission {
            sport_name: "Rowing".to_string(),
            event_name: "Rowing Men's Coxed Eights".to_string(),
            olympics_name: "2004 Summer".to_string(),
            age: Some(23),
            medal_id: None,
        }
    }

    #[test]
    fn test_medal_display_passes_real_medals_through() {
        assert_eq!(medal_display(Some("Gold")), "Gold");
        assert_eq!(medal_display(Some("Bronze")), "Bronze");
    }

    #[test]
    fn test_medal_display_normalizes_na_and_missing() {
        assert_eq!(medal_display(Some("NA")), NO_MEDAL);
        assert_eq!(medal_display(Some("")), NO_MEDAL);
        assert_eq!(medal_display(None), NO_MEDAL);
    }

    #[test]
    fn test_age_display() {
        assert_eq!(age_display(Some(34)), "34");
        assert_eq!(age_display(None), UNKNOWN_AGE);
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_submission(&submission()).is_empty());
    }

    #[test]
    fn test_blank_names_are_required() {
        let mut s = submission();
        s.sport_name = "   ".to_string();
        let errors = validate_submission(&s);
        assert!(errors.contains_key("sport_name"));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut s = submission();
        s.event_name = "x".repeat(MAX_NAME_LENGTH + 1);
        let errors = validate_submission(&s);
        assert!(errors.contains_key("event_name"));
    }

    #[test]
    fn test_name_at_limit_accepted() {
        let mut s = submission();
        s.event_name = "x".repeat(MAX_NAME_LENGTH);
        assert!(validate_submission(&s).is_empty());
    }

    #[test]
    fn test_age_bounds() {
        for (age, ok) in [(0, false), (1, true), (120, true), (121, false)] {
            let mut s = submission();
            s.age = Some(age);
            assert_eq!(validate_submission(&s).is_empty(), ok, "age {}", age);
        }
    }

    #[test]
    fn test_missing_age_reported() {
        let mut s = submission();
        s.age = None;
        assert!(validate_submission(&s).contains_key("age"));
    }

    #[test]
    fn test_all_violations_reported_together() {
        let s = ResultSubmission {
            sport_name: String::new(),
            event_name: String::new(),
            olympics_name: String::new(),
            age: Some(300),
            medal_id: None,
        };
        let errors = validate_submission(&s);
        assert_eq!(errors.len(), 4);
    }
}
