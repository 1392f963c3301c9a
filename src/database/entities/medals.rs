use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Medal classification. The dataset uses "NA" for medal-less results; the
/// query layer normalizes that to a placeholder before it reaches a client.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "medals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub medal_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::competitor_events::Entity")]
    CompetitorEvents,
}

impl Related<super::competitor_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CompetitorEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
