use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[record(name = "Location")]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    pub address: String,
    #[sea_orm(indexed)]
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::filter::{Field, StringFilter, UuidFilter};

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn address() -> Field<Column, StringFilter> {
        Field::new(Column::Address)
    }

    pub fn city() -> Field<Column, StringFilter> {
        Field::new(Column::City)
    }

    pub fn state() -> Field<Column, StringFilter> {
        Field::new(Column::State)
    }

    pub fn country() -> Field<Column, StringFilter> {
        Field::new(Column::Country)
    }

    pub fn postal_code() -> Field<Column, StringFilter> {
        Field::new(Column::PostalCode)
    }
}
