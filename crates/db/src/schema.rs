//! Table definitions for the hospital store.
//!
//! Foreign-key policy: an appointment is removed together with its
//! patient; doctor and department references are set to `NULL` when the
//! referenced row is deleted.

use sqlx::Connection;
use tracing::info;

use crate::{Database, DbError};

const TABLES: [(&str, &str); 4] = [
    (
        "departments",
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    ),
    (
        "doctors",
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            department_id INTEGER REFERENCES departments(id) ON DELETE SET NULL,
            email TEXT
        )
        "#,
    ),
    (
        "patients",
        r#"
        CREATE TABLE IF NOT EXISTS patients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            dob TEXT,
            gender TEXT,
            phone TEXT,
            email TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
    (
        "appointments",
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
            doctor_id INTEGER REFERENCES doctors(id) ON DELETE SET NULL,
            department_id INTEGER REFERENCES departments(id) ON DELETE SET NULL,
            start_time TEXT NOT NULL,
            end_time TEXT,
            status TEXT NOT NULL DEFAULT 'scheduled',
            reason TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    ),
];

/// Create any missing tables. Safe to call on an initialised store.
pub async fn init_schema(db: &Database) -> Result<(), DbError> {
    info!(path = %db.path().display(), "Applying hospital schema");
    let mut conn = db.connect().await?;

    for (table, ddl) in TABLES {
        sqlx::query(ddl).execute(&mut conn).await?;
        info!(table, "table ready");
    }

    conn.close().await?;
    Ok(())
}
