use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult, LeaseDao, PropertyDao, UniqueKey, UserDao};
use crate::db::entities::enums::{ApplicationStatus, Role};
use crate::db::entities::{application, lease, prelude::Application, property, user};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationKey {
    Id(Uuid),
    LeaseId(Uuid),
}

impl UniqueKey<Application> for ApplicationKey {
    fn condition(&self) -> Condition {
        let expr = match self {
            ApplicationKey::Id(id) => application::Column::Id.eq(*id),
            ApplicationKey::LeaseId(lease_id) => application::Column::LeaseId.eq(*lease_id),
        };
        Condition::all().add(expr)
    }

    fn describe(&self) -> String {
        match self {
            ApplicationKey::Id(id) => format!("id={id}"),
            ApplicationKey::LeaseId(lease_id) => format!("lease_id={lease_id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub property_id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
}

#[derive(Clone)]
pub struct ApplicationDao {
    db: DatabaseConnection,
}

impl DaoBase for ApplicationDao {
    type Entity = Application;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ApplicationDao {
    /// Files a pending application. The applicant must have the `TENANT` role.
    pub async fn submit(&self, new: NewApplication) -> DaoResult<application::Model> {
        UserDao::new(&self.db)
            .require_role(new.tenant_id, Role::Tenant)
            .await?;

        let model = application::ActiveModel {
            application_date: Set(Utc::now().fixed_offset()),
            status: Set(ApplicationStatus::Pending),
            property_id: Set(new.property_id),
            tenant_id: Set(new.tenant_id),
            name: Set(new.name),
            email: Set(new.email),
            phone_number: Set(new.phone_number),
            message: Set(new.message),
            lease_id: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: ApplicationStatus,
    ) -> DaoResult<application::Model> {
        self.update(id, move |active| {
            active.status = Set(status);
        })
        .await
    }

    /// Links the lease created from this application. A lease backs at most
    /// one application.
    pub async fn attach_lease(&self, id: Uuid, lease_id: Uuid) -> DaoResult<application::Model> {
        self.update(id, move |active| {
            active.lease_id = Set(Some(lease_id));
        })
        .await
    }

    pub async fn property(&self, application: &application::Model) -> DaoResult<property::Model> {
        PropertyDao::new(&self.db)
            .find_by_id(application.property_id)
            .await
    }

    pub async fn tenant(&self, application: &application::Model) -> DaoResult<user::Model> {
        UserDao::new(&self.db)
            .find_by_id(application.tenant_id)
            .await
    }

    pub async fn lease(
        &self,
        application: &application::Model,
    ) -> DaoResult<Option<lease::Model>> {
        match application.lease_id {
            Some(lease_id) => LeaseDao::new(&self.db).find_unique(lease_id).await,
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use super::{ApplicationDao, ApplicationKey, NewApplication};
    use crate::db::dao::test_models::{application_model, lease_model, user_model};
    use crate::db::dao::{DaoBase, DaoLayerError};
    use crate::db::entities::enums::{ApplicationStatus, Role};

    fn new_application(tenant_id: Uuid) -> NewApplication {
        NewApplication {
            property_id: Uuid::new_v4(),
            tenant_id,
            name: "Tess Tenant".to_string(),
            email: "tess@example.com".to_string(),
            phone_number: "+15550101".to_string(),
            message: Some("Quiet, no pets".to_string()),
        }
    }

    #[tokio::test]
    async fn submit_rejects_managers() {
        let manager_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_model(manager_id, "m@example.com", Role::Manager)]])
            .into_connection();
        let dao = ApplicationDao::new(&db);

        let err = dao
            .submit(new_application(manager_id))
            .await
            .expect_err("managers cannot apply");
        assert!(matches!(err, DaoLayerError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn submit_creates_pending_application() {
        let tenant_id = Uuid::new_v4();
        let stored = application_model(Uuid::new_v4(), Uuid::new_v4(), tenant_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[user_model(tenant_id, "t@example.com", Role::Tenant)]])
            .append_query_results([[stored.clone()]])
            .into_connection();
        let dao = ApplicationDao::new(&db);

        let created = dao
            .submit(new_application(tenant_id))
            .await
            .expect("insert should succeed");
        assert_eq!(created.status, ApplicationStatus::Pending);
        assert_eq!(created.id, stored.id);
    }

    #[tokio::test]
    async fn lease_is_none_without_link() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = ApplicationDao::new(&db);
        let application = application_model(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let lease = dao.lease(&application).await.expect("no query needed");
        assert!(lease.is_none());
    }

    #[tokio::test]
    async fn lease_follows_link() {
        let property_id = Uuid::new_v4();
        let tenant_id = Uuid::new_v4();
        let lease = lease_model(Uuid::new_v4(), property_id, tenant_id);
        let mut application = application_model(Uuid::new_v4(), property_id, tenant_id);
        application.lease_id = Some(lease.id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[lease.clone()]])
            .into_connection();
        let dao = ApplicationDao::new(&db);

        let found = dao.lease(&application).await.expect("query should succeed");
        assert_eq!(found.map(|l| l.id), Some(lease.id));
    }

    #[tokio::test]
    async fn find_unique_by_lease_id() {
        let lease_id = Uuid::new_v4();
        let mut application = application_model(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        application.lease_id = Some(lease_id);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[application.clone()]])
            .into_connection();
        let dao = ApplicationDao::new(&db);

        let found = dao
            .find_unique(ApplicationKey::LeaseId(lease_id))
            .await
            .expect("query should succeed");
        assert_eq!(found, Some(application));
    }
}
