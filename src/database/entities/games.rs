use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One Olympics edition.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub games_name: String,
    pub season: Option<String>,
    pub year: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::games_competitors::Entity")]
    GamesCompetitors,
}

impl Related<super::games_competitors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamesCompetitors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
