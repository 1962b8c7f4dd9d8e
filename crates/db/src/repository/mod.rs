//! Repository functions — one function per database operation.
//!
//! Every function takes a `&Database`, opens its own connection, and
//! returns a `Result<T, DbError>`. Point lookups return `Ok(None)` for a
//! missing id; updates and deletes of a missing id return
//! `DbError::NotFound`. No business logic, no domain types — pure SQL.

use chrono::NaiveDateTime;

pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod patients;

/// ISO-8601 text form used for appointment times. Fractional seconds are
/// kept when present.
pub(crate) fn iso_text(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// Map "zero rows touched" onto [`crate::DbError::NotFound`].
pub(crate) fn require_affected(rows_affected: u64) -> Result<(), crate::DbError> {
    if rows_affected == 0 {
        return Err(crate::DbError::NotFound);
    }
    Ok(())
}
