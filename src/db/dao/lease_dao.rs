use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{
    ApplicationDao, ApplicationKey, DaoBase, DaoLayerError, DaoResult, PropertyDao, UserDao,
};
use crate::db::entities::enums::{LeaseStatus, Role};
use crate::db::entities::{application, lease, payment, prelude::Lease, property, user};

#[derive(Debug, Clone)]
pub struct NewLease {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub rent: f64,
    pub deposit: f64,
    pub status: LeaseStatus,
}

#[derive(Clone)]
pub struct LeaseDao {
    db: DatabaseConnection,
}

impl DaoBase for LeaseDao {
    type Entity = Lease;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl LeaseDao {
    /// Signs a lease for a `TENANT`; the end date may not precede the start.
    pub async fn create_lease(&self, new: NewLease) -> DaoResult<lease::Model> {
        if new.end_date < new.start_date {
            return Err(DaoLayerError::invalid(format!(
                "lease ends ({}) before it starts ({})",
                new.end_date, new.start_date
            )));
        }
        UserDao::new(&self.db)
            .require_role(new.tenant_id, Role::Tenant)
            .await?;

        let model = lease::ActiveModel {
            start_date: Set(new.start_date),
            end_date: Set(new.end_date),
            rent: Set(new.rent),
            deposit: Set(new.deposit),
            status: Set(new.status),
            property_id: Set(new.property_id),
            tenant_id: Set(new.tenant_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn property(&self, lease: &lease::Model) -> DaoResult<property::Model> {
        PropertyDao::new(&self.db).find_by_id(lease.property_id).await
    }

    pub async fn tenant(&self, lease: &lease::Model) -> DaoResult<user::Model> {
        UserDao::new(&self.db).find_by_id(lease.tenant_id).await
    }

    /// The application this lease was created from, if any.
    pub async fn application(&self, lease: &lease::Model) -> DaoResult<Option<application::Model>> {
        ApplicationDao::new(&self.db)
            .find_unique(ApplicationKey::LeaseId(lease.id))
            .await
    }

    /// Payments in due-date order.
    pub async fn payments(&self, lease: &lease::Model) -> DaoResult<Vec<payment::Model>> {
        payment::Entity::find()
            .filter(payment::Column::LeaseId.eq(lease.id))
            .order_by_asc(payment::Column::DueDate)
            .all(self.db())
            .await
            .map_err(|err| DaoLayerError::db("Payment", err))
    }
}
