//! Appointment CRUD operations.
//!
//! Times are written as ISO-8601 text (`YYYY-MM-DDTHH:MM:SS[.ffffff]`).

use sqlx::Connection;
use tracing::debug;

use crate::{
    models::{AppointmentFields, AppointmentListing, AppointmentRow, NewAppointment},
    repository::{iso_text, require_affected},
    Database, DbError,
};

/// Book a new appointment in `scheduled` status and return its id.
///
/// The patient (and doctor/department, when given) must exist; otherwise
/// the insert fails with `DbError::MissingReference`.
pub async fn add_appointment(db: &Database, appt: &NewAppointment) -> Result<i64, DbError> {
    let mut conn = db.connect().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO appointments
            (patient_id, doctor_id, department_id, start_time, end_time, reason)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(appt.patient_id)
    .bind(appt.doctor_id)
    .bind(appt.department_id)
    .bind(iso_text(&appt.start_time))
    .bind(appt.end_time.as_ref().map(iso_text))
    .bind(&appt.reason)
    .execute(&mut conn)
    .await?
    .last_insert_rowid();

    conn.close().await?;
    debug!(id, patient_id = appt.patient_id, "appointment booked");
    Ok(id)
}

/// Return all appointments with patient, doctor and department names, in
/// id order.
pub async fn list_appointments(db: &Database) -> Result<Vec<AppointmentListing>, DbError> {
    let mut conn = db.connect().await?;

    let rows = sqlx::query_as::<_, AppointmentListing>(
        r#"
        SELECT a.id, a.patient_id, a.doctor_id, a.department_id, a.start_time,
               a.end_time, a.status, a.reason, a.created_at,
               p.first_name AS patient_first, p.last_name AS patient_last,
               d.first_name AS doctor_first, d.last_name AS doctor_last,
               dep.name AS department_name
        FROM appointments a
        JOIN patients p ON a.patient_id = p.id
        LEFT JOIN doctors d ON a.doctor_id = d.id
        LEFT JOIN departments dep ON a.department_id = dep.id
        ORDER BY a.id
        "#,
    )
    .fetch_all(&mut conn)
    .await?;

    conn.close().await?;
    Ok(rows)
}

/// Fetch a single appointment by its primary key.
pub async fn get_appointment(db: &Database, id: i64) -> Result<Option<AppointmentRow>, DbError> {
    let mut conn = db.connect().await?;

    let row = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT id, patient_id, doctor_id, department_id, start_time, end_time,
               status, reason, created_at
        FROM appointments
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut conn)
    .await?;

    conn.close().await?;
    Ok(row)
}

/// Replace every mutable column of an appointment, status included.
///
/// Returns `DbError::NotFound` if no row has this id; nothing is written.
pub async fn update_appointment(
    db: &Database,
    id: i64,
    appt: &AppointmentFields,
) -> Result<(), DbError> {
    let mut conn = db.connect().await?;
    let booking = &appt.booking;

    let result = sqlx::query(
        r#"
        UPDATE appointments
        SET patient_id = ?, doctor_id = ?, department_id = ?, start_time = ?,
            end_time = ?, status = ?, reason = ?
        WHERE id = ?
        "#,
    )
    .bind(booking.patient_id)
    .bind(booking.doctor_id)
    .bind(booking.department_id)
    .bind(iso_text(&booking.start_time))
    .bind(booking.end_time.as_ref().map(iso_text))
    .bind(appt.status)
    .bind(&booking.reason)
    .bind(id)
    .execute(&mut conn)
    .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}

/// Delete an appointment.
pub async fn delete_appointment(db: &Database, id: i64) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}
