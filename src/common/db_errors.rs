//! Database error categorization
//!
//! Maps `sea_orm::DbErr` values onto the handful of categories the service
//! layer cares about, so storage errors can be translated into domain errors
//! in one place.

use sea_orm::{DbErr, SqlErr};

/// Categories of database errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Record not found (query returned no results)
    NotFound,

    /// Unique constraint violation
    UniqueViolation,

    /// Foreign key constraint violation
    ForeignKeyViolation,

    /// Database connection error
    ConnectionError,

    /// Unknown/other database error
    Unknown,
}

impl DbErrorKind {
    /// Categorize a sea_orm database error
    pub fn from_db_err(err: &DbErr) -> Self {
        // Driver-level classification is authoritative when available
        if let Some(sql_err) = err.sql_err() {
            return match sql_err {
                SqlErr::UniqueConstraintViolation(_) => Self::UniqueViolation,
                SqlErr::ForeignKeyConstraintViolation(_) => Self::ForeignKeyViolation,
                _ => Self::Unknown,
            };
        }

        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::Conn(_) => Self::ConnectionError,
            DbErr::Exec(err) | DbErr::Query(err) => {
                let msg = err.to_string().to_lowercase();
                if msg.contains("unique") || msg.contains("duplicate") {
                    Self::UniqueViolation
                } else if msg.contains("foreign key") {
                    Self::ForeignKeyViolation
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }

    /// Check if this is a client error rather than a storage fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::UniqueViolation | Self::ForeignKeyViolation
        )
    }
}

/// True when the error is a unique-constraint violation
pub fn is_unique_violation(err: &DbErr) -> bool {
    DbErrorKind::from_db_err(err) == DbErrorKind::UniqueViolation
}
