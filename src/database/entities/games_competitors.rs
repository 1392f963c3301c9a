use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A person's participation in one games edition, carrying their age at the
/// time of competition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games_competitors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub person_id: i32,
    pub games_id: i32,
    pub age: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::people::Entity",
        from = "Column::PersonId",
        to = "super::people::Column::Id"
    )]
    Person,
    #[sea_orm(
        belongs_to = "super::games::Entity",
        from = "Column::GamesId",
        to = "super::games::Column::Id"
    )]
    Games,
    #[sea_orm(has_many = "super::competitor_events::Entity")]
    CompetitorEvents,
}

impl Related<super::people::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::games::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Games.def()
    }
}

impl Related<super::competitor_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitorEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
