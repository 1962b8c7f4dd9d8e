use axum::{extract::State, http::StatusCode};
use db::models::{DoctorFields, DoctorListing, DoctorRow};
use db::repository::doctors as doctor_repo;

use super::{optional, required, Created};
use crate::extract::{Json, Path};
use crate::{ApiError, AppState};

fn clean(payload: DoctorFields) -> Result<DoctorFields, ApiError> {
    Ok(DoctorFields {
        first_name: required("first_name", &payload.first_name)?,
        last_name: required("last_name", &payload.last_name)?,
        department_id: payload.department_id,
        email: optional(payload.email),
    })
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<DoctorListing>>, ApiError> {
    Ok(Json(doctor_repo::list_doctors(&state.db).await?))
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DoctorRow>, ApiError> {
    doctor_repo::get_doctor(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "doctor", id })
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<DoctorFields>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let doctor = clean(payload)?;
    let id = doctor_repo::add_doctor(&state.db, &doctor).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<DoctorFields>,
) -> Result<StatusCode, ApiError> {
    let doctor = clean(payload)?;
    doctor_repo::update_doctor(&state.db, id, &doctor)
        .await
        .map_err(ApiError::for_row("doctor", id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    doctor_repo::delete_doctor(&state.db, id)
        .await
        .map_err(ApiError::for_row("doctor", id))?;
    Ok(StatusCode::NO_CONTENT)
}
