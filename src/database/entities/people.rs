use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An athlete. Name, gender and body measurements are all optional in the
/// source dataset; readers substitute placeholders, never fail.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "people")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
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
