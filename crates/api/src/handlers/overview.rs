//! Whole-store views: health, the home overview, and store initialisation.

use axum::{extract::State, Json};
use db::models::{AppointmentListing, DepartmentRow, DoctorListing, PatientRow};
use db::repository::{appointments, departments, doctors, patients};
use db::SeedReport;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{ApiError, AppState};

/// Everything the home screen lists, plus the departments its scheduling
/// form offers.
#[derive(Debug, Serialize)]
pub struct Overview {
    pub patients: Vec<PatientRow>,
    pub doctors: Vec<DoctorListing>,
    pub departments: Vec<DepartmentRow>,
    pub appointments: Vec<AppointmentListing>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn overview(State(state): State<AppState>) -> Result<Json<Overview>, ApiError> {
    Ok(Json(Overview {
        patients: patients::list_patients(&state.db).await?,
        doctors: doctors::list_doctors(&state.db).await?,
        departments: departments::list_departments(&state.db).await?,
        appointments: appointments::list_appointments(&state.db).await?,
    }))
}

/// Apply the schema and append sample data.
pub async fn init(State(state): State<AppState>) -> Result<Json<SeedReport>, ApiError> {
    db::init_schema(&state.db).await?;
    Ok(Json(db::seed_sample_data(&state.db).await?))
}
