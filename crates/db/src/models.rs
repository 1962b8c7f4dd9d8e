//! Row structs that map 1-to-1 onto database tables, plus the joined
//! listing rows and the field sets accepted by inserts and updates.
//!
//! These are *persistence* models — they carry no domain behaviour.
//! Optional columns are `Option<T>`; nothing is modelled as a missing key.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Deserialize an optional value from text, treating a blank string the
/// same as a missing one.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

// ---------------------------------------------------------------------------
// patients
// ---------------------------------------------------------------------------

/// A persisted patient row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PatientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Set by the store at insert time.
    pub created_at: NaiveDateTime,
}

/// Mutable patient columns, used by both insert and full-row update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFields {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PatientFields {
    /// Fields for a patient known only by name.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// departments
// ---------------------------------------------------------------------------

/// A persisted department row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DepartmentRow {
    pub id: i64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// doctors
// ---------------------------------------------------------------------------

/// A persisted doctor row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<i64>,
    pub email: Option<String>,
}

/// A doctor row joined with the name of its department, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DoctorListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub doctor: DoctorRow,
    pub department_name: Option<String>,
}

/// Mutable doctor columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorFields {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// appointments
// ---------------------------------------------------------------------------

/// Lifecycle status of an appointment. Stored as lowercase text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::NoShow    => write!(f, "no_show"),
        }
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show"   => Ok(Self::NoShow),
            other       => Err(format!("unknown appointment status: {other}")),
        }
    }
}

/// A persisted appointment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AppointmentRow {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: Option<i64>,
    pub department_id: Option<i64>,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub created_at: NaiveDateTime,
}

/// An appointment joined with the display names of everything it references.
///
/// `patient_first`/`patient_last` are always present: appointments are
/// removed together with their patient. Doctor names are present iff
/// `doctor_id` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AppointmentListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub appointment: AppointmentRow,
    pub patient_first: String,
    pub patient_last: String,
    pub doctor_first: Option<String>,
    pub doctor_last: Option<String>,
    pub department_name: Option<String>,
}

/// Columns supplied when booking an appointment. Status always starts as
/// [`AppointmentStatus::Scheduled`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default)]
    pub department_id: Option<i64>,
    pub start_time: NaiveDateTime,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl NewAppointment {
    pub fn new(patient_id: i64, start_time: NaiveDateTime) -> Self {
        Self {
            patient_id,
            doctor_id: None,
            department_id: None,
            start_time,
            end_time: None,
            reason: None,
        }
    }
}

/// Every mutable appointment column, for full-row replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFields {
    #[serde(flatten)]
    pub booking: NewAppointment,
    #[serde(default)]
    pub status: AppointmentStatus,
}
