use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, Set};
use uuid::Uuid;

use super::{DaoBase, DaoResult, LeaseDao};
use crate::db::entities::enums::PaymentStatus;
use crate::db::entities::{lease, payment, prelude::Payment};

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub lease_id: Uuid,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub due_date: DateTimeWithTimeZone,
    pub payment_date: DateTimeWithTimeZone,
    pub payment_status: PaymentStatus,
}

#[derive(Clone)]
pub struct PaymentDao {
    db: DatabaseConnection,
}

impl DaoBase for PaymentDao {
    type Entity = Payment;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl PaymentDao {
    pub async fn record_payment(&self, new: NewPayment) -> DaoResult<payment::Model> {
        let model = payment::ActiveModel {
            amount_due: Set(new.amount_due),
            amount_paid: Set(new.amount_paid),
            due_date: Set(new.due_date),
            payment_date: Set(new.payment_date),
            payment_status: Set(new.payment_status),
            lease_id: Set(new.lease_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn set_status(&self, id: Uuid, status: PaymentStatus) -> DaoResult<payment::Model> {
        self.update(id, move |active| {
            active.payment_status = Set(status);
        })
        .await
    }

    pub async fn lease(&self, payment: &payment::Model) -> DaoResult<lease::Model> {
        LeaseDao::new(&self.db).find_by_id(payment.lease_id).await
    }
}
