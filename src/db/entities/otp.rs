use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[record(name = "Otp")]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "otps")]
pub struct Model {
    pub code: String,
    pub expires_at: DateTimeWithTimeZone,
    #[sea_orm(default_value = false)]
    pub email_verified: bool,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::filter::{BoolFilter, DateTimeFilter, Field, StringFilter, UuidFilter};

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn code() -> Field<Column, StringFilter> {
        Field::new(Column::Code)
    }

    pub fn expires_at() -> Field<Column, DateTimeFilter> {
        Field::new(Column::ExpiresAt)
    }

    pub fn email_verified() -> Field<Column, BoolFilter> {
        Field::new(Column::EmailVerified)
    }

    pub fn user_id() -> Field<Column, UuidFilter> {
        Field::new(Column::UserId)
    }
}
