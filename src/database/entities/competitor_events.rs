use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single result record: one competitor entered one event, optionally
/// winning a medal.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "competitor_events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub competitor_id: i32,
    pub event_id: Option<i32>,
    pub medal_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::games_competitors::Entity",
        from = "Column::CompetitorId",
        to = "super::games_competitors::Column::Id"
    )]
    Competitor,
    #[sea_orm(
        belongs_to = "super::events::Entity",
        from = "Column::EventId",
        to = "super::events::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "super::medals::Entity",
        from = "Column::MedalId",
        to = "super::medals::Column::Id"
    )]
    Medal,
}

impl Related<super::games_competitors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Competitor.def()
    }
}

impl Related<super::events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::medals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Medal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
