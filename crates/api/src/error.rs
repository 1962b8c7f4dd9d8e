//! API error type and its JSON rendering.
//!
//! Bodies look like `{ "error": "<kind>", "message": "<text>" }`.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use db::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required form field was blank (400).
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// No row with this id (404).
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    /// The request body or path could not be decoded.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Anything the repository reported.
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    /// Error mapper for calls that address one row: attaches the resource
    /// name and id to `DbError::NotFound`.
    pub fn for_row(resource: &'static str, id: i64) -> impl FnOnce(DbError) -> Self {
        move |err| match err {
            DbError::NotFound => Self::NotFound { resource, id },
            other => Self::Database(other),
        }
    }

    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::MissingField { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Rejected { status, .. } => (*status, "invalid_request"),
            Self::NotFound { .. } | Self::Database(DbError::NotFound) => {
                (StatusCode::NOT_FOUND, "not_found")
            }
            Self::Database(DbError::UniqueViolation(_)) => (StatusCode::CONFLICT, "conflict"),
            Self::Database(DbError::MissingReference(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "missing_reference")
            }
            Self::Database(DbError::Sqlx(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!("Request aborted: {}", self);
        }
        let body = json!({
            "error": kind,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
