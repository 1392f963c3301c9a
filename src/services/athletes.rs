//! Paginated athlete listing.
//!
//! The listing is ordered by full name over the whole set before the page
//! window is taken, so page N+1 always continues where page N stopped. Medal
//! and competition counts are derived per page from the result records rather
//! than stored anywhere.

use std::collections::{HashMap, HashSet};

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::database::entities::{competitor_events, games_competitors, medals, people};
use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

const UNKNOWN_NAME: &str = "Unknown name";
const UNKNOWN_GENDER: &str = "Unknown gender";
const UNKNOWN_HEIGHT: &str = "Unknown height";
const UNKNOWN_WEIGHT: &str = "Unknown weight";

#[derive(Debug, Serialize)]
pub struct AthleteRow {
    pub id: i32,
    pub full_name: String,
    pub gender: String,
    pub height: String,
    pub weight: String,
    pub gold_medals: u64,
    pub silver_medals: u64,
    pub bronze_medals: u64,
    pub competitions_count: u64,
    pub competitions_link: String,
}

#[derive(Debug, Serialize)]
pub struct AthletePage {
    pub total_athletes: u64,
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub athletes: Vec<AthleteRow>,
}

/// Reject out-of-range paging before any query runs.
fn validate_paging(page: i64, page_size: i64) -> Result<(), AppError> {
    let mut fields = std::collections::BTreeMap::new();
    if page < 1 {
        fields.insert("page".to_string(), "Page must be at least 1".to_string());
    }
    if page_size < 1 {
        fields.insert(
            "page_size".to_string(),
            "Page size must be at least 1".to_string(),
        );
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation { fields })
    }
}

pub async fn list_athletes(
    db: &DatabaseConnection,
    page: i64,
    page_size: i64,
) -> Result<AthletePage, AppError> {
    validate_paging(page, page_size)?;
    let (page, page_size) = (page as u64, page_size as u64);

    let total_athletes = people::Entity::find().count(db).await?;

    let slice = people::Entity::find()
        .order_by_asc(people::Column::FullName)
        .order_by_asc(people::Column::Id)
        .offset((page - 1) * page_size)
        .limit(page_size)
        .all(db)
        .await?;

    let athletes = annotate_with_results(db, slice).await?;

    Ok(AthletePage {
        total_athletes,
        current_page: page,
        page_size,
        total_pages: total_athletes.div_ceil(page_size),
        has_previous: page > 1,
        has_next: page * page_size < total_athletes,
        athletes,
    })
}

#[derive(Default)]
struct ResultTally {
    gold: u64,
    silver: u64,
    bronze: u64,
    competitions: HashSet<(Option<i32>, i32)>,
}

/// Attach medal counts and the distinct (event, games) competition count to a
/// page of athletes. Loads the page's result records in bulk and tallies in
/// memory instead of issuing per-athlete count queries.
async fn annotate_with_results(
    db: &DatabaseConnection,
    slice: Vec<people::Model>,
) -> Result<Vec<AthleteRow>, AppError> {
    if slice.is_empty() {
        return Ok(Vec::new());
    }

    let person_ids: Vec<i32> = slice.iter().map(|p| p.id).collect();

    let competitors = games_competitors::Entity::find()
        .filter(games_competitors::Column::PersonId.is_in(person_ids))
        .all(db)
        .await?;

    // competitor id -> (person id, games id)
    let competitor_index: HashMap<i32, (i32, i32)> = competitors
        .iter()
        .map(|c| (c.id, (c.person_id, c.games_id)))
        .collect();

    let mut tallies: HashMap<i32, ResultTally> = HashMap::new();

    if !competitor_index.is_empty() {
        let competitor_ids: Vec<i32> = competitor_index.keys().copied().collect();

        let results = competitor_events::Entity::find()
            .filter(competitor_events::Column::CompetitorId.is_in(competitor_ids))
            .find_also_related(medals::Entity)
            .all(db)
            .await?;

        for (record, medal) in results {
            let Some(&(person_id, games_id)) = competitor_index.get(&record.competitor_id) else {
                continue;
            };

            let tally = tallies.entry(person_id).or_default();
            match medal.as_ref().map(|m| m.medal_name.as_str()) {
                Some("Gold") => tally.gold += 1,
                Some("Silver") => tally.silver += 1,
                Some("Bronze") => tally.bronze += 1,
                _ => {}
            }
            tally.competitions.insert((record.event_id, games_id));
        }
    }

    let rows = slice
        .into_iter()
        .map(|person| {
            let tally = tallies.remove(&person.id).unwrap_or_default();
            AthleteRow {
                id: person.id,
                full_name: person.full_name.unwrap_or_else(|| UNKNOWN_NAME.to_string()),
                gender: person.gender.unwrap_or_else(|| UNKNOWN_GENDER.to_string()),
                height: person
                    .height
                    .map(|h| h.to_string())
                    .unwrap_or_else(|| UNKNOWN_HEIGHT.to_string()),
                weight: person
                    .weight
                    .map(|w| w.to_string())
                    .unwrap_or_else(|| UNKNOWN_WEIGHT.to_string()),
                gold_medals: tally.gold,
                silver_medals: tally.silver,
                bronze_medals: tally.bronze,
                competitions_count: tally.competitions.len() as u64,
                competitions_link: format!("/athletes/{}/competitions", person.id),
            }
        })
        .collect();

    Ok(rows)
}
