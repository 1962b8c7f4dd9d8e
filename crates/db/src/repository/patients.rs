//! Patient CRUD operations.

use sqlx::Connection;
use tracing::debug;

use crate::{
    models::{PatientFields, PatientRow},
    repository::require_affected,
    Database, DbError,
};

/// Insert a new patient and return its id. `created_at` is set by the store.
pub async fn add_patient(db: &Database, patient: &PatientFields) -> Result<i64, DbError> {
    let mut conn = db.connect().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO patients (first_name, last_name, dob, gender, phone, email)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(patient.dob)
    .bind(&patient.gender)
    .bind(&patient.phone)
    .bind(&patient.email)
    .execute(&mut conn)
    .await?
    .last_insert_rowid();

    conn.close().await?;
    debug!(id, "patient added");
    Ok(id)
}

/// Return all patients, newest first.
pub async fn list_patients(db: &Database) -> Result<Vec<PatientRow>, DbError> {
    let mut conn = db.connect().await?;

    let rows = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT id, first_name, last_name, dob, gender, phone, email, created_at
        FROM patients
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(&mut conn)
    .await?;

    conn.close().await?;
    Ok(rows)
}

/// Fetch a single patient by its primary key.
pub async fn get_patient(db: &Database, id: i64) -> Result<Option<PatientRow>, DbError> {
    let mut conn = db.connect().await?;

    let row = sqlx::query_as::<_, PatientRow>(
        r#"
        SELECT id, first_name, last_name, dob, gender, phone, email, created_at
        FROM patients
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut conn)
    .await?;

    conn.close().await?;
    Ok(row)
}

/// Replace every mutable column of a patient.
///
/// Returns `DbError::NotFound` if no row has this id.
pub async fn update_patient(
    db: &Database,
    id: i64,
    patient: &PatientFields,
) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query(
        r#"
        UPDATE patients
        SET first_name = ?, last_name = ?, dob = ?, gender = ?, phone = ?, email = ?
        WHERE id = ?
        "#,
    )
    .bind(&patient.first_name)
    .bind(&patient.last_name)
    .bind(patient.dob)
    .bind(&patient.gender)
    .bind(&patient.phone)
    .bind(&patient.email)
    .bind(id)
    .execute(&mut conn)
    .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}

/// Permanently delete a patient. Their appointments go with them.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn delete_patient(db: &Database, id: i64) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("DELETE FROM patients WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}
