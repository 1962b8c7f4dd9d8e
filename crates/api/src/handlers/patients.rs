use axum::{extract::State, http::StatusCode};
use db::models::{PatientFields, PatientRow};
use db::repository::patients as patient_repo;

use super::{optional, required, Created};
use crate::extract::{Json, Path};
use crate::{ApiError, AppState};

fn clean(payload: PatientFields) -> Result<PatientFields, ApiError> {
    Ok(PatientFields {
        first_name: required("first_name", &payload.first_name)?,
        last_name: required("last_name", &payload.last_name)?,
        dob: payload.dob,
        gender: optional(payload.gender),
        phone: optional(payload.phone),
        email: optional(payload.email),
    })
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PatientRow>>, ApiError> {
    Ok(Json(patient_repo::list_patients(&state.db).await?))
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PatientRow>, ApiError> {
    patient_repo::get_patient(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "patient", id })
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<PatientFields>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let patient = clean(payload)?;
    let id = patient_repo::add_patient(&state.db, &patient).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<PatientFields>,
) -> Result<StatusCode, ApiError> {
    let patient = clean(payload)?;
    patient_repo::update_patient(&state.db, id, &patient)
        .await
        .map_err(ApiError::for_row("patient", id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    patient_repo::delete_patient(&state.db, id)
        .await
        .map_err(ApiError::for_row("patient", id))?;
    Ok(StatusCode::NO_CONTENT)
}
