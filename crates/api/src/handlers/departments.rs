use axum::{extract::State, http::StatusCode};
use db::models::DepartmentRow;
use db::repository::departments as dept_repo;
use serde::Deserialize;

use super::{required, Created};
use crate::extract::{Json, Path};
use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct DepartmentDto {
    pub name: String,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DepartmentRow>>, ApiError> {
    Ok(Json(dept_repo::list_departments(&state.db).await?))
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DepartmentRow>, ApiError> {
    dept_repo::get_department(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "department", id })
}

/// Adding an existing name answers 200 with that department's id; only a
/// new row gets 201.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DepartmentDto>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let name = required("name", &payload.name)?;
    let insert = dept_repo::add_department_checked(&state.db, &name).await?;
    let status = if insert.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(Created { id: insert.id })))
}

pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<DepartmentDto>,
) -> Result<StatusCode, ApiError> {
    let name = required("name", &payload.name)?;
    dept_repo::update_department(&state.db, id, &name)
        .await
        .map_err(ApiError::for_row("department", id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    dept_repo::delete_department(&state.db, id)
        .await
        .map_err(ApiError::for_row("department", id))?;
    Ok(StatusCode::NO_CONTENT)
}
