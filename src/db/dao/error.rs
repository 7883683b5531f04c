use std::fmt;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Unique => f.write_str("unique"),
            ConstraintKind::ForeignKey => f.write_str("foreign key"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DaoLayerError {
    #[error("Database error: {0}")]
    Db(#[source] DbErr),
    #[error("{entity} not found ({key})")]
    NotFound { entity: &'static str, key: String },
    #[error("{entity} violates a {kind} constraint: {detail}")]
    ConstraintViolation {
        entity: &'static str,
        kind: ConstraintKind,
        detail: String,
    },
    #[error("Invalid pagination: page={page} page_size={page_size}")]
    InvalidPagination { page: u64, page_size: u64 },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type DaoResult<T> = Result<T, DaoLayerError>;

impl DaoLayerError {
    /// Classifies a driver error raised while working on `entity`.
    pub fn db(entity: &'static str, err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => DaoLayerError::ConstraintViolation {
                entity,
                kind: ConstraintKind::Unique,
                detail,
            },
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                DaoLayerError::ConstraintViolation {
                    entity,
                    kind: ConstraintKind::ForeignKey,
                    detail,
                }
            }
            _ => DaoLayerError::Db(err),
        }
    }

    pub fn not_found(entity: &'static str, key: impl fmt::Display) -> Self {
        DaoLayerError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        DaoLayerError::InvalidArgument(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DaoLayerError::NotFound { .. })
    }

    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            DaoLayerError::ConstraintViolation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::{DaoLayerError, ConstraintKind};

    #[test]
    fn unclassified_driver_errors_stay_db_errors() {
        let err = DaoLayerError::db("User", DbErr::Custom("boom".to_string()));
        assert!(matches!(err, DaoLayerError::Db(_)));
        assert_eq!(err.constraint_kind(), None);
        assert_eq!(err.to_string(), "Database error: Custom Error: boom");
    }

    #[test]
    fn not_found_names_entity_and_key() {
        let err = DaoLayerError::not_found("Lease", "id=42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Lease not found (id=42)");
    }

    #[test]
    fn constraint_kind_is_exposed() {
        let err = DaoLayerError::ConstraintViolation {
            entity: "User",
            kind: ConstraintKind::Unique,
            detail: "users.email".to_string(),
        };
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Unique));
        assert_eq!(
            err.to_string(),
            "User violates a unique constraint: users.email"
        );
    }
}
