use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use super::base_traits::RecordEntity;

/// A lookup that matches at most one row of `E`.
pub trait UniqueKey<E>: Send + Sync {
    fn condition(&self) -> Condition;

    /// Human readable form used in `NotFound` errors.
    fn describe(&self) -> String;
}

impl<E: RecordEntity> UniqueKey<E> for Uuid {
    fn condition(&self) -> Condition {
        Condition::all().add(E::id_column().eq(*self))
    }

    fn describe(&self) -> String {
        format!("id={self}")
    }
}
