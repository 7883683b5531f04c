use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ApplicationStatus;

#[record(name = "Application")]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    pub application_date: DateTimeWithTimeZone,
    #[sea_orm(extra = "CHECK (status IN ('Pending', 'Denied', 'Approved'))")]
    pub status: ApplicationStatus,
    #[sea_orm(indexed)]
    pub property_id: Uuid,
    #[sea_orm(indexed)]
    pub tenant_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
    #[sea_orm(unique, nullable)]
    pub lease_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Cascade"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TenantId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Tenant,
    #[sea_orm(
        belongs_to = "super::lease::Entity",
        from = "Column::LeaseId",
        to = "super::lease::Column::Id",
        on_delete = "SetNull"
    )]
    Lease,
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

impl Related<super::lease::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lease.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::entities::enums::ApplicationStatus;
    use crate::db::filter::{
        DateTimeFilter, EnumFilter, Field, Nullable, StringFilter, UuidFilter,
    };

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn application_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::ApplicationDate)
    }

    pub fn status() -> Field<Column, EnumFilter<ApplicationStatus>> {
        Field::new(Column::Status)
    }

    pub fn property_id() -> Field<Column, UuidFilter> {
        Field::new(Column::PropertyId)
    }

    pub fn tenant_id() -> Field<Column, UuidFilter> {
        Field::new(Column::TenantId)
    }

    pub fn name() -> Field<Column, StringFilter> {
        Field::new(Column::Name)
    }

    pub fn email() -> Field<Column, StringFilter> {
        Field::new(Column::Email)
    }

    pub fn phone_number() -> Field<Column, StringFilter> {
        Field::new(Column::PhoneNumber)
    }

    pub fn message() -> Field<Column, Nullable<StringFilter>> {
        Field::new(Column::Message)
    }

    pub fn lease_id() -> Field<Column, Nullable<UuidFilter>> {
        Field::new(Column::LeaseId)
    }
}
