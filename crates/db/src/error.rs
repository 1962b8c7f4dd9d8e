//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(sqlx::Error),

    #[error("row not found")]
    NotFound,

    /// A `UNIQUE` constraint rejected the statement (e.g. renaming a
    /// department onto an existing name).
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign key points at a row that does not exist.
    #[error("referenced row does not exist: {0}")]
    MissingReference(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return Self::MissingReference(db_err.message().to_string());
            }
        }
        Self::Sqlx(err)
    }
}
