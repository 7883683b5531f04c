use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::db::connection;
use crate::db::dao::{DaoContext, NewLease, NewLocation, NewProperty, NewUser};
use crate::db::entities::enums::{LeaseStatus, PropertyType, Role};
use crate::db::entities::lists::{Amenities, Highlights, PhotoUrls};
use crate::db::entities::{lease, location, property, user};

/// A private in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    connection::connect(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory database should open")
}

pub async fn memory_context() -> DaoContext {
    DaoContext::new(&memory_db().await)
}

pub async fn seed_user(daos: &DaoContext, email: &str, role: Role) -> user::Model {
    daos.user()
        .create_user(NewUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            name: email.split('@').next().unwrap_or(email).to_string(),
            phone_number: "+15550100".to_string(),
            role,
        })
        .await
        .expect("seed user should insert")
}

pub async fn seed_location(daos: &DaoContext, city: &str) -> location::Model {
    daos.location()
        .create_location(NewLocation {
            address: "1 Main St".to_string(),
            city: city.to_string(),
            state: "WA".to_string(),
            country: "US".to_string(),
            postal_code: "98101".to_string(),
        })
        .await
        .expect("seed location should insert")
}

pub fn listing(name: &str, location_id: Uuid, manager_id: Uuid) -> NewProperty {
    NewProperty {
        name: name.to_string(),
        description: format!("{name} near the park"),
        price_per_month: 1500.0,
        security_deposit: 1500.0,
        application_fee: 50.0,
        photo_urls: PhotoUrls::default(),
        amenities: Amenities::default(),
        highlights: Highlights::default(),
        is_pets_allowed: false,
        is_parking_included: false,
        beds: 2,
        baths: 1.0,
        square_feet: 800,
        property_type: PropertyType::Apartment,
        location_id,
        manager_id,
    }
}

pub async fn seed_property(
    daos: &DaoContext,
    name: &str,
    location_id: Uuid,
    manager_id: Uuid,
) -> property::Model {
    daos.property()
        .create_listing(listing(name, location_id, manager_id))
        .await
        .expect("seed property should insert")
}

pub async fn seed_lease(daos: &DaoContext, property_id: Uuid, tenant_id: Uuid) -> lease::Model {
    let start = Utc::now().fixed_offset();
    daos.lease()
        .create_lease(NewLease {
            property_id,
            tenant_id,
            start_date: start,
            end_date: start + Duration::days(365),
            rent: 1500.0,
            deposit: 1500.0,
            status: LeaseStatus::Active,
        })
        .await
        .expect("seed lease should insert")
}
