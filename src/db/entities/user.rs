use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::Role;

#[record(name = "User")]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone_number: String,
    #[sea_orm(extra = "CHECK (role IN ('TENANT', 'MANAGER'))")]
    pub role: Role,
    #[sea_orm(default_value = false)]
    pub email_verified: bool,
    #[sea_orm(unique, nullable)]
    pub reset_password_token: Option<String>,
    pub reset_password_expires: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::entities::enums::Role;
    use crate::db::filter::{
        BoolFilter, DateTimeFilter, EnumFilter, Field, Nullable, StringFilter, UuidFilter,
    };

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn created_at() -> Field<Column, DateTimeFilter> {
        Field::new(Column::CreatedAt)
    }

    pub fn email() -> Field<Column, StringFilter> {
        Field::new(Column::Email)
    }

    pub fn name() -> Field<Column, StringFilter> {
        Field::new(Column::Name)
    }

    pub fn phone_number() -> Field<Column, StringFilter> {
        Field::new(Column::PhoneNumber)
    }

    pub fn role() -> Field<Column, EnumFilter<Role>> {
        Field::new(Column::Role)
    }

    pub fn email_verified() -> Field<Column, BoolFilter> {
        Field::new(Column::EmailVerified)
    }

    pub fn reset_password_token() -> Field<Column, Nullable<StringFilter>> {
        Field::new(Column::ResetPasswordToken)
    }

    pub fn reset_password_expires() -> Field<Column, Nullable<DateTimeFilter>> {
        Field::new(Column::ResetPasswordExpires)
    }
}
