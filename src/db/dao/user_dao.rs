use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult, UniqueKey};
use crate::db::entities::enums::Role;
use crate::db::entities::{
    application, lease, otp, prelude::User, property, property_favorite, property_tenant,
    session, user,
};

/// Lookups that identify a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserKey {
    Id(Uuid),
    Email(String),
    ResetToken(String),
}

impl UniqueKey<User> for UserKey {
    fn condition(&self) -> Condition {
        let expr = match self {
            UserKey::Id(id) => user::Column::Id.eq(*id),
            UserKey::Email(email) => user::Column::Email.eq(email.clone()),
            UserKey::ResetToken(token) => user::Column::ResetPasswordToken.eq(token.clone()),
        };
        Condition::all().add(expr)
    }

    fn describe(&self) -> String {
        match self {
            UserKey::Id(id) => format!("id={id}"),
            UserKey::Email(email) => format!("email={email}"),
            UserKey::ResetToken(_) => "reset_password_token=<redacted>".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct UserDao {
    db: DatabaseConnection,
}

impl DaoBase for UserDao {
    type Entity = User;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl UserDao {
    pub async fn find_by_email(&self, email: &str) -> DaoResult<Option<user::Model>> {
        self.find_unique(UserKey::Email(email.to_string())).await
    }

    pub async fn create_user(&self, new: NewUser) -> DaoResult<user::Model> {
        let model = user::ActiveModel {
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            name: Set(new.name),
            phone_number: Set(new.phone_number),
            role: Set(new.role),
            email_verified: Set(false),
            reset_password_token: Set(None),
            reset_password_expires: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Loads a user and checks it has `role`.
    pub async fn require_role(&self, id: Uuid, role: Role) -> DaoResult<user::Model> {
        let user = self.find_by_id(id).await?;
        if user.role != role {
            return Err(DaoLayerError::invalid(format!(
                "user {id} has role {:?}, expected {role:?}",
                user.role
            )));
        }
        Ok(user)
    }

    pub async fn mark_email_verified(&self, id: Uuid) -> DaoResult<user::Model> {
        self.update(id, |active| {
            active.email_verified = Set(true);
        })
        .await
    }

    pub async fn set_password_reset(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<FixedOffset>,
    ) -> DaoResult<user::Model> {
        let token = token.to_string();
        self.update(id, move |active| {
            active.reset_password_token = Set(Some(token));
            active.reset_password_expires = Set(Some(expires_at));
        })
        .await
    }

    /// Finds the user holding an unexpired reset token.
    pub async fn find_by_reset_token(&self, token: &str) -> DaoResult<Option<user::Model>> {
        let now = Utc::now().fixed_offset();
        let user = self
            .find_unique(UserKey::ResetToken(token.to_string()))
            .await?;
        Ok(user.filter(|user| {
            user.reset_password_expires
                .is_some_and(|expires_at| expires_at > now)
        }))
    }

    pub async fn clear_password_reset(&self, id: Uuid) -> DaoResult<user::Model> {
        self.update(id, |active| {
            active.reset_password_token = Set(None);
            active.reset_password_expires = Set(None);
        })
        .await
    }

    pub async fn managed_properties(&self, user: &user::Model) -> DaoResult<Vec<property::Model>> {
        property::Entity::find()
            .filter(property::Column::ManagerId.eq(user.id))
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Property", err))
    }

    /// Properties the user is recorded as living in.
    pub async fn tenant_properties(&self, user: &user::Model) -> DaoResult<Vec<property::Model>> {
        let rented = Query::select()
            .column(property_tenant::Column::PropertyId)
            .from(property_tenant::Entity)
            .and_where(property_tenant::Column::UserId.eq(user.id))
            .to_owned();
        property::Entity::find()
            .filter(property::Column::Id.in_subquery(rented))
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Property", err))
    }

    pub async fn favorites(&self, user: &user::Model) -> DaoResult<Vec<property::Model>> {
        let favorited = Query::select()
            .column(property_favorite::Column::PropertyId)
            .from(property_favorite::Entity)
            .and_where(property_favorite::Column::UserId.eq(user.id))
            .to_owned();
        property::Entity::find()
            .filter(property::Column::Id.in_subquery(favorited))
            .order_by_asc(property::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Property", err))
    }

    /// Saving the same favorite twice is a unique constraint violation.
    pub async fn add_favorite(&self, user_id: Uuid, property_id: Uuid) -> DaoResult<()> {
        let link = property_favorite::ActiveModel {
            user_id: Set(user_id),
            property_id: Set(property_id),
            created_at: Set(Utc::now().fixed_offset()),
        };
        property_favorite::Entity::insert(link)
            .exec_without_returning(self.db())
            .await
            .map_err(|err| DaoLayerError::db("PropertyFavorite", err))?;
        Ok(())
    }

    /// Returns whether a favorite was removed.
    pub async fn remove_favorite(&self, user_id: Uuid, property_id: Uuid) -> DaoResult<bool> {
        let result = property_favorite::Entity::delete_many()
            .filter(property_favorite::Column::UserId.eq(user_id))
            .filter(property_favorite::Column::PropertyId.eq(property_id))
            .exec(self.db())
            .await
            .map_err(|err| DaoLayerError::db("PropertyFavorite", err))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn applications(&self, user: &user::Model) -> DaoResult<Vec<application::Model>> {
        application::Entity::find()
            .filter(application::Column::TenantId.eq(user.id))
            .order_by_desc(application::Column::ApplicationDate)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Application", err))
    }

    pub async fn leases(&self, user: &user::Model) -> DaoResult<Vec<lease::Model>> {
        lease::Entity::find()
            .filter(lease::Column::TenantId.eq(user.id))
            .order_by_desc(lease::Column::StartDate)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Lease", err))
    }

    pub async fn otps(&self, user: &user::Model) -> DaoResult<Vec<otp::Model>> {
        otp::Entity::find()
            .filter(otp::Column::UserId.eq(user.id))
            .order_by_desc(otp::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Otp", err))
    }

    pub async fn sessions(&self, user: &user::Model) -> DaoResult<Vec<session::Model>> {
        session::Entity::find()
            .filter(session::Column::UserId.eq(user.id))
            .order_by_desc(session::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Session", err))
    }
}
