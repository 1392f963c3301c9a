use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sliding session lifetime. Every authenticated request pushes the expiry
/// this far into the future.
pub const SESSION_TTL_MINUTES: i64 = 30;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub token: String,
    pub account_email: String,
    pub created_at: ChronoDateTimeUtc,
    pub expires_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new(account_email: String) -> Self {
        let now = chrono::Utc::now();

        Self {
            id: ActiveValue::NotSet,
            token: Set(Uuid::new_v4().to_string()),
            account_email: Set(account_email),
            created_at: Set(now),
            expires_at: Set(now + chrono::Duration::minutes(SESSION_TTL_MINUTES)),
        }
    }

    pub fn renewed(mut self) -> Self {
        self.expires_at =
            Set(chrono::Utc::now() + chrono::Duration::minutes(SESSION_TTL_MINUTES));
        self
    }
}

impl Model {
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now() > self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_not_expired() {
        let now = chrono::Utc::now();
        let session = Model {
            id: 1,
            token: "t".to_string(),
            account_email: "a@b.cd".to_string(),
            created_at: now,
            expires_at: now + chrono::Duration::minutes(SESSION_TTL_MINUTES),
        };
        assert!(!session.is_expired());
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = chrono::Utc::now();
        let session = Model {
            id: 1,
            token: "t".to_string(),
            account_email: "a@b.cd".to_string(),
            created_at: now - chrono::Duration::hours(1),
            expires_at: now - chrono::Duration::minutes(1),
        };
        assert!(session.is_expired());
    }
}
