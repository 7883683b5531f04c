use record_derive::record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::PropertyType;
use super::lists::{Amenities, Highlights, PhotoUrls};

#[record(name = "Property")]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    pub name: String,
    pub description: String,
    pub price_per_month: f64,
    pub security_deposit: f64,
    pub application_fee: f64,
    #[sea_orm(column_type = "Json")]
    pub photo_urls: PhotoUrls,
    #[sea_orm(column_type = "Json")]
    pub amenities: Amenities,
    #[sea_orm(column_type = "Json")]
    pub highlights: Highlights,
    #[sea_orm(default_value = false)]
    pub is_pets_allowed: bool,
    #[sea_orm(default_value = false)]
    pub is_parking_included: bool,
    pub beds: i32,
    pub baths: f64,
    pub square_feet: i32,
    #[sea_orm(extra = "CHECK (property_type IN ('Rooms', 'Tinyhouse', 'Apartment', 'Villa', 'Townhouse', 'Cottage'))")]
    pub property_type: PropertyType,
    pub posted_date: DateTimeWithTimeZone,
    pub average_rating: Option<f64>,
    pub number_of_reviews: Option<i32>,
    #[sea_orm(indexed)]
    pub location_id: Uuid,
    #[sea_orm(indexed)]
    pub manager_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_delete = "Restrict"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ManagerId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Manager,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manager.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub mod fields {
    use super::Column;
    use crate::db::entities::enums::{Amenity, Highlight, PropertyType};
    use crate::db::filter::{
        BoolFilter, DateTimeFilter, EnumFilter, Field, FloatFilter, IntFilter, ListFilter,
        Nullable, StringFilter, UuidFilter,
    };

    pub fn id() -> Field<Column, UuidFilter> {
        Field::new(Column::Id)
    }

    pub fn name() -> Field<Column, StringFilter> {
        Field::new(Column::Name)
    }

    pub fn description() -> Field<Column, StringFilter> {
        Field::new(Column::Description)
    }

    pub fn price_per_month() -> Field<Column, FloatFilter> {
        Field::new(Column::PricePerMonth)
    }

    pub fn security_deposit() -> Field<Column, FloatFilter> {
        Field::new(Column::SecurityDeposit)
    }

    pub fn application_fee() -> Field<Column, FloatFilter> {
        Field::new(Column::ApplicationFee)
    }

    pub fn photo_urls() -> Field<Column, ListFilter<String>> {
        Field::new(Column::PhotoUrls)
    }

    pub fn amenities() -> Field<Column, ListFilter<Amenity>> {
        Field::new(Column::Amenities)
    }

    pub fn highlights() -> Field<Column, ListFilter<Highlight>> {
        Field::new(Column::Highlights)
    }

    pub fn is_pets_allowed() -> Field<Column, BoolFilter> {
        Field::new(Column::IsPetsAllowed)
    }

    pub fn is_parking_included() -> Field<Column, BoolFilter> {
        Field::new(Column::IsParkingIncluded)
    }

    pub fn beds() -> Field<Column, IntFilter> {
        Field::new(Column::Beds)
    }

    pub fn baths() -> Field<Column, FloatFilter> {
        Field::new(Column::Baths)
    }

    pub fn square_feet() -> Field<Column, IntFilter> {
        Field::new(Column::SquareFeet)
    }

    pub fn property_type() -> Field<Column, EnumFilter<PropertyType>> {
        Field::new(Column::PropertyType)
    }

    pub fn posted_date() -> Field<Column, DateTimeFilter> {
        Field::new(Column::PostedDate)
    }

    pub fn average_rating() -> Field<Column, Nullable<FloatFilter>> {
        Field::new(Column::AverageRating)
    }

    pub fn number_of_reviews() -> Field<Column, Nullable<IntFilter>> {
        Field::new(Column::NumberOfReviews)
    }

    pub fn location_id() -> Field<Column, UuidFilter> {
        Field::new(Column::LocationId)
    }

    pub fn manager_id() -> Field<Column, UuidFilter> {
        Field::new(Column::ManagerId)
    }
}
