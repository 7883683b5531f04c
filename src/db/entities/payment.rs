use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::PaymentStatus;

#[record(name = "Payment")]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    pub amount_due: f64,
    pub amount_paid: f64,
    pub due_date: DateTimeWithTimeZone,
    pub payment_date: DateTimeWithTimeZone,
    #[sea_orm(extra = "CHECK (payment_status IN ('Pending', 'Paid', 'PartiallyPaid', 'Overdue'))")]
    pub payment_status: PaymentStatus,
    #[sea_orm(indexed)]
    pub lease_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lease::Entity",
        from = "Column::LeaseId",
        to = "super::lease::Column::Id",
        on_delete = "Cascade"
    )]
    Lease,
}

impl Related<super::lease::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lease.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::entities::enums::PaymentStatus;
    use crate::db::filter::{DateTimeFilter, EnumFilter, Field, FloatFilter, UuidFilter};

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn amount_due() -> Field<Column, FloatFilter> {
        Field::new(Column::AmountDue)
    }

    pub fn amount_paid() -> Field<Column, FloatFilter> {
        Field::new(Column::AmountPaid)
    }

    pub fn due_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::DueDate)
    }

    pub fn payment_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::PaymentDate)
    }

    pub fn payment_status() -> Field<Column, EnumFilter<PaymentStatus>> {
        Field::new(Column::PaymentStatus)
    }

    pub fn lease_id() -> Field<Column, UuidFilter> {
        Field::new(Column::LeaseId)
    }
}
