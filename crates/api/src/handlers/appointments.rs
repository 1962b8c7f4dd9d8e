use axum::{extract::State, http::StatusCode};
use chrono::{NaiveDate, NaiveTime};
use db::models::{AppointmentFields, AppointmentListing, AppointmentRow, NewAppointment};
use db::repository::appointments as appt_repo;
use serde::Deserialize;
use tracing::info;

use super::{optional, Created};
use crate::extract::{Json, Path};
use crate::{ApiError, AppState};

/// The scheduling form: the start is picked as a separate date and time.
#[derive(Debug, Deserialize)]
pub struct ScheduleDto {
    pub patient_id: i64,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    #[serde(default)]
    pub reason: Option<String>,
}

fn clean(mut booking: NewAppointment) -> NewAppointment {
    booking.reason = optional(booking.reason);
    booking
}

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<AppointmentListing>>, ApiError> {
    Ok(Json(appt_repo::list_appointments(&state.db).await?))
}

pub async fn get(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<AppointmentRow>, ApiError> {
    appt_repo::get_appointment(&state.db, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound { resource: "appointment", id })
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewAppointment>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let booking = clean(payload);
    let id = appt_repo::add_appointment(&state.db, &booking).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn schedule(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleDto>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let booking = NewAppointment {
        doctor_id: payload.doctor_id,
        department_id: payload.department_id,
        reason: optional(payload.reason),
        ..NewAppointment::new(payload.patient_id, payload.start_date.and_time(payload.start_time))
    };
    let id = appt_repo::add_appointment(&state.db, &booking).await?;
    info!(id, patient_id = booking.patient_id, "Appointment scheduled");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn update(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<AppointmentFields>,
) -> Result<StatusCode, ApiError> {
    let appt = AppointmentFields {
        booking: clean(payload.booking),
        status: payload.status,
    };
    appt_repo::update_appointment(&state.db, id, &appt)
        .await
        .map_err(ApiError::for_row("appointment", id))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    appt_repo::delete_appointment(&state.db, id)
        .await
        .map_err(ApiError::for_row("appointment", id))?;
    Ok(StatusCode::NO_CONTENT)
}
