use chrono::{DateTime, Duration, FixedOffset, Utc};
use rand::Rng;
use sea_orm::{ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;

use super::{DaoBase, DaoResult, UserDao};
use crate::db::entities::{otp, prelude::Otp, user};

/// How one-time passcodes are minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpPolicy {
    pub ttl: Duration,
    pub length: usize,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(10),
            length: 6,
        }
    }
}

fn generate_code(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[derive(Clone)]
pub struct OtpDao {
    db: DatabaseConnection,
}

impl DaoBase for OtpDao {
    type Entity = Otp;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl OtpDao {
    pub async fn issue(&self, user_id: Uuid, policy: &OtpPolicy) -> DaoResult<otp::Model> {
        let model = otp::ActiveModel {
            code: Set(generate_code(policy.length)),
            expires_at: Set(Utc::now().fixed_offset() + policy.ttl),
            email_verified: Set(false),
            user_id: Set(user_id),
            ..Default::default()
        };
        self.create(model).await
    }

    /// The newest unexpired passcode of `user_id` equal to `code`.
    pub async fn find_valid(
        &self,
        user_id: Uuid,
        code: &str,
        now: DateTime<FixedOffset>,
    ) -> DaoResult<Option<otp::Model>> {
        let code = code.to_string();
        self.find(1, 1, None, move |query| {
            query
                .filter(otp::Column::UserId.eq(user_id))
                .filter(otp::Column::Code.eq(code))
                .filter(otp::Column::ExpiresAt.gt(now))
                .order_by_desc(otp::Column::CreatedAt)
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    /// Deletes a valid passcode and returns it; `None` when the code is wrong
    /// or expired.
    pub async fn consume(&self, user_id: Uuid, code: &str) -> DaoResult<Option<otp::Model>> {
        let Some(otp) = self
            .find_valid(user_id, code, Utc::now().fixed_offset())
            .await?
        else {
            return Ok(None);
        };
        let removed = self.delete_many(Some(otp::fields::id().equals(otp.id))).await?;
        // Already consumed by a concurrent caller.
        if removed == 0 {
            return Ok(None);
        }
        Ok(Some(otp))
    }

    pub async fn purge_expired(&self, now: DateTime<FixedOffset>) -> DaoResult<u64> {
        let purged = self
            .delete_many(Some(otp::fields::expires_at().lte(now)))
            .await?;
        info!(purged, "purged expired otps");
        Ok(purged)
    }

    pub async fn user(&self, otp: &otp::Model) -> DaoResult<user::Model> {
        UserDao::new(&self.db).find_by_id(otp.user_id).await
    }
}
