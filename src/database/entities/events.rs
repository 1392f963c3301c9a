use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sport_id: Option<i32>,
    pub event_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sports::Entity",
        from = "Column::SportId",
        to = "super::sports::Column::Id"
    )]
    Sport,
    #[sea_orm(has_many = "super::competitor_events::Entity")]
    CompetitorEvents,
}

impl Related<super::sports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sport.def()
    }
}

impl Related<super::competitor_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitorEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
