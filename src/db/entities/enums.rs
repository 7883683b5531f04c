use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Role {
    #[sea_orm(string_value = "TENANT")]
    #[serde(rename = "TENANT")]
    Tenant,
    #[sea_orm(string_value = "MANAGER")]
    #[serde(rename = "MANAGER")]
    Manager,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PropertyType {
    #[sea_orm(string_value = "Rooms")]
    Rooms,
    #[sea_orm(string_value = "Tinyhouse")]
    Tinyhouse,
    #[sea_orm(string_value = "Apartment")]
    Apartment,
    #[sea_orm(string_value = "Villa")]
    Villa,
    #[sea_orm(string_value = "Townhouse")]
    Townhouse,
    #[sea_orm(string_value = "Cottage")]
    Cottage,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Denied")]
    Denied,
    #[sea_orm(string_value = "Approved")]
    Approved,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum LeaseStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Expired")]
    Expired,
    #[sea_orm(string_value = "Terminated")]
    Terminated,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Paid")]
    Paid,
    #[sea_orm(string_value = "PartiallyPaid")]
    PartiallyPaid,
    #[sea_orm(string_value = "Overdue")]
    Overdue,
}

/// Amenities a listing advertises. Stored inside a JSON array column, so only
/// the serde names matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Amenity {
    WasherDryer,
    AirConditioning,
    Dishwasher,
    HighSpeedInternet,
    HardwoodFloors,
    WalkInClosets,
    Microwave,
    Refrigerator,
    Pool,
    Gym,
    Parking,
    PetsAllowed,
    WiFi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize, Deserialize)]
pub enum Highlight {
    HighSpeedInternetAccess,
    WasherDryer,
    AirConditioning,
    Heating,
    SmokeFree,
    CableReady,
    SatelliteTV,
    DoubleVanities,
    TubShower,
    Intercom,
    SprinklerSystem,
    RecentlyRenovated,
    CloseToTransit,
    GreatView,
    QuietNeighborhood,
}

#[cfg(test)]
mod tests {
    use sea_orm::{ActiveEnum, DbBackend, EntityTrait, Iterable, Schema};

    use super::{ApplicationStatus, LeaseStatus, PaymentStatus, PropertyType, Role};
    use crate::db::entities::{application, lease, payment, property, user};

    fn create_table<E: EntityTrait>(entity: E) -> String {
        let backend = DbBackend::Sqlite;
        backend
            .build(&Schema::new(backend).create_table_from_entity(entity))
            .to_string()
    }

    fn assert_checked<A: ActiveEnum<Value = String> + Iterable>(sql: &str, column: &str) {
        let allowed: Vec<String> = A::iter()
            .map(|variant| format!("'{}'", variant.to_value()))
            .collect();
        let check = format!("CHECK ({column} IN ({}))", allowed.join(", "));
        assert!(sql.contains(&check), "{sql}");
    }

    #[test]
    fn enum_columns_carry_a_check_for_every_variant() {
        assert_checked::<Role>(&create_table(user::Entity), "role");
        assert_checked::<PropertyType>(&create_table(property::Entity), "property_type");
        assert_checked::<ApplicationStatus>(&create_table(application::Entity), "status");
        assert_checked::<LeaseStatus>(&create_table(lease::Entity), "status");
        assert_checked::<PaymentStatus>(&create_table(payment::Entity), "payment_status");
    }
}
