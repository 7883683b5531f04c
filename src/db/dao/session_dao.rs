use chrono::{DateTime, Duration, FixedOffset, Utc};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult, UniqueKey, UserDao};
use crate::db::entities::{prelude::Session, session, user};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKey {
    Id(Uuid),
    RefreshToken(String),
}

impl UniqueKey<Session> for SessionKey {
    fn condition(&self) -> Condition {
        let expr = match self {
            SessionKey::Id(id) => session::Column::Id.eq(*id),
            SessionKey::RefreshToken(token) => session::Column::RefreshToken.eq(token.clone()),
        };
        Condition::all().add(expr)
    }

    fn describe(&self) -> String {
        match self {
            SessionKey::Id(id) => format!("id={id}"),
            SessionKey::RefreshToken(_) => "refresh_token=<redacted>".to_string(),
        }
    }
}

fn new_refresh_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

#[derive(Clone)]
pub struct SessionDao {
    db: DatabaseConnection,
}

impl DaoBase for SessionDao {
    type Entity = Session;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl SessionDao {
    pub async fn open(&self, user_id: Uuid, ttl: Duration) -> DaoResult<session::Model> {
        let model = session::ActiveModel {
            refresh_token: Set(new_refresh_token()),
            expires_at: Set(Utc::now().fixed_offset() + ttl),
            user_id: Set(user_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_active_by_token(
        &self,
        token: &str,
        now: DateTime<FixedOffset>,
    ) -> DaoResult<Option<session::Model>> {
        let session = self
            .find_unique(SessionKey::RefreshToken(token.to_string()))
            .await?;
        Ok(session.filter(|session| session.expires_at > now))
    }

    /// Replaces the refresh token of a live session and extends it by `ttl`.
    pub async fn rotate(&self, token: &str, ttl: Duration) -> DaoResult<session::Model> {
        let now = Utc::now().fixed_offset();
        let key = SessionKey::RefreshToken(token.to_string());
        let live = self
            .find_active_by_token(token, now)
            .await?
            .ok_or_else(|| DaoLayerError::not_found("Session", key.describe()))?;
        let next = new_refresh_token();
        self.update(live.id, move |active| {
            active.refresh_token = Set(next);
            active.expires_at = Set(now + ttl);
        })
        .await
    }

    /// Returns whether a session was revoked.
    pub async fn revoke(&self, token: &str) -> DaoResult<bool> {
        let revoked = self
            .delete_many(Some(session::fields::refresh_token().equals(token)))
            .await?;
        Ok(revoked > 0)
    }

    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> DaoResult<u64> {
        let revoked = self
            .delete_many(Some(session::fields::user_id().equals(user_id)))
            .await?;
        info!(%user_id, revoked, "revoked user sessions");
        Ok(revoked)
    }

    pub async fn purge_expired(&self, now: DateTime<FixedOffset>) -> DaoResult<u64> {
        let purged = self
            .delete_many(Some(session::fields::expires_at().lte(now)))
            .await?;
        info!(purged, "purged expired sessions");
        Ok(purged)
    }

    pub async fn user(&self, session: &session::Model) -> DaoResult<user::Model> {
        UserDao::new(&self.db).find_by_id(session.user_id).await
    }
}
