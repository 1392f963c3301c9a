//! Credential verification and session lifecycle.
//!
//! The credential check sits behind the [`CredentialStore`] trait so the
//! hardwired single-account setup stays a deployment detail rather than a
//! baked-in comparison. Sessions are database rows keyed by an opaque token;
//! the cookie only ever carries the token.

use anyhow::{anyhow, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::database::entities::sessions;

/// Answers whether an email/password pair identifies the administrator.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// Single-account store. Holds one email and a bcrypt hash of the configured
/// password; the plaintext is dropped after hashing.
pub struct StaticCredentials {
    email: String,
    password_hash: String,
}

impl StaticCredentials {
    pub fn new(email: impl Into<String>, password: &str) -> Result<Self> {
        if password.is_empty() {
            return Err(anyhow!("Admin password cannot be empty"));
        }

        let password_hash =
            hash(password, DEFAULT_COST).map_err(|e| anyhow!("Failed to hash password: {}", e))?;

        Ok(Self {
            email: email.into(),
            password_hash,
        })
    }
}

impl CredentialStore for StaticCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == self.email && verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Database-backed session store with a sliding 30 minute expiry.
#[derive(Clone)]
pub struct SessionService {
    db: DatabaseConnection,
}

impl SessionService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open a fresh session for an authenticated account.
    pub async fn open(&self, account_email: &str) -> Result<sessions::Model, DbErr> {
        sessions::ActiveModel::new(account_email.to_string())
            .insert(&self.db)
            .await
    }

    /// Look up a token. Expired rows are removed and report as absent; live
    /// sessions get their expiry pushed out (sliding renewal).
    pub async fn resolve(&self, token: &str) -> Result<Option<sessions::Model>, DbErr> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .one(&self.db)
            .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        if session.is_expired() {
            sessions::Entity::delete_by_id(session.id)
                .exec(&self.db)
                .await?;
            return Ok(None);
        }

        let active: sessions::ActiveModel = session.into();
        let renewed = active.renewed().update(&self.db).await?;
        Ok(Some(renewed))
    }

    /// Drop the session for a token. Unknown tokens are a no-op.
    pub async fn revoke(&self, token: &str) -> Result<(), DbErr> {
        sessions::Entity::delete_many()
            .filter(sessions::Column::Token.eq(token))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
