//! Request handlers, one module per resource.
//!
//! Handlers do the form-level work the repository assumes has been done:
//! required names must be non-blank and blank optional strings are stored
//! as absent.

use serde::Serialize;

use crate::ApiError;

pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod overview;
pub mod patients;

/// Body returned by every create endpoint.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

/// Trim a required field, rejecting it when nothing is left.
pub(crate) fn required(field: &'static str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingField { field });
    }
    Ok(trimmed.to_string())
}

/// Blank optional text is treated as not supplied.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
