use sea_orm::DatabaseConnection;

use super::{
    ApplicationDao, DaoBase, LeaseDao, LocationDao, OtpDao, PaymentDao, PropertyDao, SessionDao,
    UserDao,
};

/// Hands out repositories that share one connection pool.
#[derive(Clone)]
pub struct DaoContext {
    db: DatabaseConnection,
}

impl DaoContext {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn user(&self) -> UserDao {
        DaoBase::new(&self.db)
    }

    pub fn otp(&self) -> OtpDao {
        DaoBase::new(&self.db)
    }

    pub fn session(&self) -> SessionDao {
        DaoBase::new(&self.db)
    }

    pub fn location(&self) -> LocationDao {
        DaoBase::new(&self.db)
    }

    pub fn property(&self) -> PropertyDao {
        DaoBase::new(&self.db)
    }

    pub fn application(&self) -> ApplicationDao {
        DaoBase::new(&self.db)
    }

    pub fn lease(&self) -> LeaseDao {
        DaoBase::new(&self.db)
    }

    pub fn payment(&self) -> PaymentDao {
        DaoBase::new(&self.db)
    }
}
