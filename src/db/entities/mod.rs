#[allow(unused_imports)]
pub mod prelude {
    pub use super::application::Entity as Application;
    pub use super::lease::Entity as Lease;
    pub use super::location::Entity as Location;
    pub use super::otp::Entity as Otp;
    pub use super::payment::Entity as Payment;
    pub use super::property::Entity as Property;
    pub use super::property_favorite::Entity as PropertyFavorite;
    pub use super::property_tenant::Entity as PropertyTenant;
    pub use super::session::Entity as Session;
    pub use super::user::Entity as User;
}

pub mod application;
pub mod enums;
pub mod lease;
pub mod lists;
pub mod location;
pub mod otp;
pub mod payment;
pub mod property;
pub mod property_favorite;
pub mod property_tenant;
pub mod session;
pub mod user;
