use chrono::{DateTime, FixedOffset, TimeZone};
use uuid::Uuid;

use crate::db::entities::enums::{ApplicationStatus, LeaseStatus, PaymentStatus, PropertyType, Role};
use crate::db::entities::lists::{Amenities, Highlights, PhotoUrls};
use crate::db::entities::{application, lease, location, otp, payment, property, session, user};

pub fn ts() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

pub fn user_model(id: Uuid, email: &str, role: Role) -> user::Model {
    let now = ts();
    user::Model {
        id,
        created_at: now,
        updated_at: now,
        email: email.to_string(),
        password_hash: "hash".to_string(),
        name: "Test User".to_string(),
        phone_number: "+15550100".to_string(),
        role,
        email_verified: false,
        reset_password_token: None,
        reset_password_expires: None,
    }
}

pub fn otp_model(id: Uuid, user_id: Uuid, code: &str) -> otp::Model {
    let now = ts();
    otp::Model {
        id,
        created_at: now,
        updated_at: now,
        code: code.to_string(),
        expires_at: now + chrono::Duration::minutes(10),
        email_verified: false,
        user_id,
    }
}

pub fn session_model(id: Uuid, user_id: Uuid, token: &str) -> session::Model {
    let now = ts();
    session::Model {
        id,
        created_at: now,
        updated_at: now,
        refresh_token: token.to_string(),
        expires_at: now + chrono::Duration::days(30),
        user_id,
    }
}

pub fn location_model(id: Uuid, city: &str) -> location::Model {
    let now = ts();
    location::Model {
        id,
        created_at: now,
        updated_at: now,
        address: "1 Main St".to_string(),
        city: city.to_string(),
        state: "WA".to_string(),
        country: "US".to_string(),
        postal_code: "98101".to_string(),
    }
}

pub fn property_model(id: Uuid, location_id: Uuid, manager_id: Uuid) -> property::Model {
    let now = ts();
    property::Model {
        id,
        created_at: now,
        updated_at: now,
        name: "Loft".to_string(),
        description: "Sunny loft".to_string(),
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
        posted_date: now,
        average_rating: None,
        number_of_reviews: None,
        location_id,
        manager_id,
    }
}

pub fn application_model(id: Uuid, property_id: Uuid, tenant_id: Uuid) -> application::Model {
    let now = ts();
    application::Model {
        id,
        created_at: now,
        updated_at: now,
        application_date: now,
        status: ApplicationStatus::Pending,
        property_id,
        tenant_id,
        name: "Tess Tenant".to_string(),
        email: "tess@example.com".to_string(),
        phone_number: "+15550101".to_string(),
        message: None,
        lease_id: None,
    }
}

pub fn lease_model(id: Uuid, property_id: Uuid, tenant_id: Uuid) -> lease::Model {
    let now = ts();
    lease::Model {
        id,
        created_at: now,
        updated_at: now,
        start_date: now,
        end_date: now + chrono::Duration::days(365),
        rent: 1500.0,
        deposit: 1500.0,
        status: LeaseStatus::Active,
        property_id,
        tenant_id,
    }
}

pub fn payment_model(id: Uuid, lease_id: Uuid) -> payment::Model {
    let now = ts();
    payment::Model {
        id,
        created_at: now,
        updated_at: now,
        amount_due: 1500.0,
        amount_paid: 0.0,
        due_date: now,
        payment_date: now,
        payment_status: PaymentStatus::Pending,
        lease_id,
    }
}
