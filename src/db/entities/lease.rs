use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::LeaseStatus;

#[record(name = "Lease")]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "leases")]
pub struct Model {
    pub start_date: DateTimeWithTimeZone,
    pub end_date: DateTimeWithTimeZone,
    pub rent: f64,
    pub deposit: f64,
    #[sea_orm(extra = "CHECK (status IN ('Pending', 'Active', 'Expired', 'Terminated'))")]
    pub status: LeaseStatus,
    #[sea_orm(indexed)]
    pub property_id: Uuid,
    #[sea_orm(indexed)]
    pub tenant_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Restrict"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TenantId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Tenant,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::entities::enums::LeaseStatus;
    use crate::db::filter::{DateTimeFilter, EnumFilter, Field, FloatFilter, UuidFilter};

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn start_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::StartDate)
    }

    pub fn end_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::EndDate)
    }

    pub fn rent() -> Field<Column, FloatFilter> {
        Field::new(Column::Rent)
    }

    pub fn deposit() -> Field<Column, FloatFilter> {
        Field::new(Column::Deposit)
    }

    pub fn status() -> Field<Column, EnumFilter<LeaseStatus>> {
        Field::new(Column::Status)
    }

    pub fn property_id() -> Field<Column, UuidFilter> {
        Field::new(Column::PropertyId)
    }

    pub fn tenant_id() -> Field<Column, UuidFilter> {
        Field::new(Column::TenantId)
    }
}
