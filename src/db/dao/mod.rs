pub mod aggregate;
pub mod application_dao;
pub mod args;
pub mod base;
pub mod base_traits;
mod context;
pub mod error;
pub mod lease_dao;
pub mod location_dao;
pub mod otp_dao;
pub mod payment_dao;
pub mod property_dao;
pub mod session_dao;
#[cfg(test)]
pub(crate) mod test_models;
pub mod unique;
pub mod user_dao;

pub use aggregate::{AggregateResult, Aggregates, CompareOp, GroupByArgs, GroupRow, Having};
pub use application_dao::{ApplicationDao, ApplicationKey, NewApplication};
pub use args::FindArgs;
pub use base::{DaoBase, DaoPager, PaginatedResponse};
pub use base_traits::{HasIdActiveModel, RecordEntity, TimestampedActiveModel};
pub use context::DaoContext;
pub use error::{ConstraintKind, DaoLayerError, DaoResult};
pub use lease_dao::{LeaseDao, NewLease};
pub use location_dao::{LocationDao, NewLocation};
pub use otp_dao::{OtpDao, OtpPolicy};
pub use payment_dao::{NewPayment, PaymentDao};
pub use property_dao::{NewProperty, PropertyDao};
pub use session_dao::{SessionDao, SessionKey};
pub use unique::UniqueKey;
pub use user_dao::{NewUser, UserDao, UserKey};
