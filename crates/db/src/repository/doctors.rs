//! Doctor CRUD operations.

use sqlx::Connection;
use tracing::debug;

use crate::{
    models::{DoctorFields, DoctorListing, DoctorRow},
    repository::require_affected,
    Database, DbError,
};

/// Insert a new doctor and return its id.
///
/// Fails with `DbError::MissingReference` if `department_id` names no
/// department.
pub async fn add_doctor(db: &Database, doctor: &DoctorFields) -> Result<i64, DbError> {
    let mut conn = db.connect().await?;

    let id = sqlx::query(
        "INSERT INTO doctors (first_name, last_name, department_id, email) VALUES (?, ?, ?, ?)",
    )
    .bind(&doctor.first_name)
    .bind(&doctor.last_name)
    .bind(doctor.department_id)
    .bind(&doctor.email)
    .execute(&mut conn)
    .await?
    .last_insert_rowid();

    conn.close().await?;
    debug!(id, "doctor added");
    Ok(id)
}

/// Return all doctors with their department name, ordered by last name.
pub async fn list_doctors(db: &Database) -> Result<Vec<DoctorListing>, DbError> {
    let mut conn = db.connect().await?;

    let rows = sqlx::query_as::<_, DoctorListing>(
        r#"
        SELECT d.id, d.first_name, d.last_name, d.department_id, d.email,
               dep.name AS department_name
        FROM doctors d
        LEFT JOIN departments dep ON d.department_id = dep.id
        ORDER BY d.last_name, d.id
        "#,
    )
    .fetch_all(&mut conn)
    .await?;

    conn.close().await?;
    Ok(rows)
}

/// Fetch a single doctor by its primary key.
pub async fn get_doctor(db: &Database, id: i64) -> Result<Option<DoctorRow>, DbError> {
    let mut conn = db.connect().await?;

    let row = sqlx::query_as::<_, DoctorRow>(
        "SELECT id, first_name, last_name, department_id, email FROM doctors WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut conn)
    .await?;

    conn.close().await?;
    Ok(row)
}

/// Replace every mutable column of a doctor.
pub async fn update_doctor(db: &Database, id: i64, doctor: &DoctorFields) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query(
        r#"
        UPDATE doctors
        SET first_name = ?, last_name = ?, department_id = ?, email = ?
        WHERE id = ?
        "#,
    )
    .bind(&doctor.first_name)
    .bind(&doctor.last_name)
    .bind(doctor.department_id)
    .bind(&doctor.email)
    .bind(id)
    .execute(&mut conn)
    .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}

/// Delete a doctor. Appointments keep their rows with `doctor_id` cleared.
pub async fn delete_doctor(db: &Database, id: i64) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("DELETE FROM doctors WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}
