use anyhow::Result;
use sea_orm::*;
use tracing::info;

use crate::database::entities::{
    competitor_events, events, games, games_competitors, medals, people, sports,
};

/// Load the demo reference dataset. Skips loading when medals are already
/// present so repeated startups stay idempotent.
pub async fn seed_reference_data(db: &DatabaseConnection) -> Result<()> {
    let existing = medals::Entity::find().one(db).await?;
    if existing.is_some() {
        info!("Reference data already present, skipping seed");
        return Ok(());
    }

    info!("Seeding demo reference dataset");

    let medal_ids = create_medals(db).await?;
    let (athletics, swimming, fencing) = create_sports(db).await?;

    let sprint = create_event(db, athletics, "Athletics Men's 100 metres").await?;
    let marathon = create_event(db, athletics, "Athletics Men's Marathon").await?;
    let freestyle = create_event(db, swimming, "Swimming Women's 200 metres Freestyle").await?;
    let epee = create_event(db, fencing, "Fencing Women's epee, Individual").await?;

    let beijing = create_games(db, "2008 Summer", Some("Summer"), Some(2008)).await?;
    let london = create_games(db, "2012 Summer", Some("Summer"), Some(2012)).await?;
    let rio = create_games(db, "2016 Summer", Some("Summer"), Some(2016)).await?;

    // Athletes with deliberate gaps: the dataset has plenty of missing
    // names, genders and measurements and readers must cope.
    let nowak = create_person(db, Some("Adam Nowak"), Some("M"), Some(182), Some(76)).await?;
    let kowalska = create_person(db, Some("Maria Kowalska"), Some("F"), Some(170), Some(60)).await?;
    let wisniewski = create_person(db, Some("Piotr Wisniewski"), None, None, Some(81)).await?;
    let anonymous = create_person(db, None, None, None, None).await?;

    let nowak_beijing = create_competitor(db, nowak, beijing, Some(21)).await?;
    let nowak_london = create_competitor(db, nowak, london, Some(25)).await?;
    let kowalska_london = create_competitor(db, kowalska, london, Some(24)).await?;
    let kowalska_rio = create_competitor(db, kowalska, rio, Some(28)).await?;
    let wisniewski_rio = create_competitor(db, wisniewski, rio, None).await?;
    let anonymous_rio = create_competitor(db, anonymous, rio, Some(30)).await?;

    let results = vec![
        // Nowak: gold in Beijing, a duplicate pair in London carrying both a
        // silver and an NA row (the history view collapses these).
        (nowak_beijing, Some(sprint), Some(medal_ids.gold)),
        (nowak_london, Some(sprint), Some(medal_ids.silver)),
        (nowak_london, Some(sprint), Some(medal_ids.na)),
        (nowak_london, Some(marathon), Some(medal_ids.na)),
        // Kowalska: medals across two editions.
        (kowalska_london, Some(freestyle), Some(medal_ids.bronze)),
        (kowalska_rio, Some(freestyle), Some(medal_ids.gold)),
        (kowalska_rio, Some(epee), None),
        // Wisniewski: no medal record at all.
        (wisniewski_rio, Some(marathon), Some(medal_ids.na)),
        // Result with no event link; listing ignores nothing, history keeps
        // the row under its games with an unknown-event placeholder.
        (anonymous_rio, None, Some(medal_ids.na)),
    ];

    let result_count = results.len();
    let result_models: Vec<competitor_events::ActiveModel> = results
        .into_iter()
        .map(|(competitor_id, event_id, medal_id)| competitor_events::ActiveModel {
            competitor_id: Set(competitor_id),
            event_id: Set(event_id),
            medal_id: Set(medal_id),
            ..Default::default()
        })
        .collect();

    competitor_events::Entity::insert_many(result_models)
        .exec(db)
        .await?;

    info!("Seeded {} result records", result_count);
    Ok(())
}

struct MedalIds {
    gold: i32,
    silver: i32,
    bronze: i32,
    na: i32,
}

async fn create_medals(db: &DatabaseConnection) -> Result<MedalIds> {
    let mut ids = Vec::new();
    for name in ["Gold", "Silver", "Bronze", "NA"] {
        let medal = medals::ActiveModel {
            medal_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(medal.id);
    }

    Ok(MedalIds {
        gold: ids[0],
        silver: ids[1],
        bronze: ids[2],
        na: ids[3],
    })
}

async fn create_sports(db: &DatabaseConnection) -> Result<(i32, i32, i32)> {
    let mut ids = Vec::new();
    for name in ["Athletics", "Swimming", "Fencing"] {
        let sport = sports::ActiveModel {
            sport_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        ids.push(sport.id);
    }

    Ok((ids[0], ids[1], ids[2]))
}

async fn create_event(db: &DatabaseConnection, sport_id: i32, name: &str) -> Result<i32> {
    let event = events::ActiveModel {
        sport_id: Set(Some(sport_id)),
        event_name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(event.id)
}

async fn create_games(
    db: &DatabaseConnection,
    name: &str,
    season: Option<&str>,
    year: Option<i32>,
) -> Result<i32> {
    let games = games::ActiveModel {
        games_name: Set(name.to_string()),
        season: Set(season.map(|s| s.to_string())),
        year: Set(year),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(games.id)
}

async fn create_person(
    db: &DatabaseConnection,
    full_name: Option<&str>,
    gender: Option<&str>,
    height: Option<i32>,
    weight: Option<i32>,
) -> Result<i32> {
    let person = people::ActiveModel {
        full_name: Set(full_name.map(|s| s.to_string())),
        gender: Set(gender.map(|s| s.to_string())),
        height: Set(height),
        weight: Set(weight),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(person.id)
}

async fn create_competitor(
    db: &DatabaseConnection,
    person_id: i32,
    games_id: i32,
    age: Option<i32>,
) -> Result<i32> {
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
