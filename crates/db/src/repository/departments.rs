//! Department CRUD operations.

use sqlx::Connection;
use tracing::debug;

use crate::{models::DepartmentRow, repository::require_affected, Database, DbError};

/// Outcome of [`add_department_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepartmentInsert {
    pub id: i64,
    /// `false` when a department with the same name already existed.
    pub created: bool,
}

/// Insert a department, or return the id of the existing one with the same
/// name. A duplicate name is not an error and never adds a row.
pub async fn add_department(db: &Database, name: &str) -> Result<i64, DbError> {
    Ok(add_department_checked(db, name).await?.id)
}

/// Like [`add_department`], but also reports whether a row was inserted.
pub async fn add_department_checked(
    db: &Database,
    name: &str,
) -> Result<DepartmentInsert, DbError> {
    let mut conn = db.connect().await?;

    let result =
        sqlx::query("INSERT INTO departments (name) VALUES (?) ON CONFLICT(name) DO NOTHING")
            .bind(name)
            .execute(&mut conn)
            .await?;

    // `last_insert_rowid` is stale when the insert was ignored, so resolve
    // the existing row by name instead.
    let created = result.rows_affected() > 0;
    let id = if created {
        result.last_insert_rowid()
    } else {
        debug!(name, "department exists, reusing id");
        sqlx::query_scalar::<_, i64>("SELECT id FROM departments WHERE name = ?")
            .bind(name)
            .fetch_one(&mut conn)
            .await?
    };

    conn.close().await?;
    Ok(DepartmentInsert { id, created })
}

/// Return all departments ordered by name.
pub async fn list_departments(db: &Database) -> Result<Vec<DepartmentRow>, DbError> {
    let mut conn = db.connect().await?;

    let rows = sqlx::query_as::<_, DepartmentRow>("SELECT id, name FROM departments ORDER BY name")
        .fetch_all(&mut conn)
        .await?;

    conn.close().await?;
    Ok(rows)
}

/// Fetch a single department by its primary key.
pub async fn get_department(db: &Database, id: i64) -> Result<Option<DepartmentRow>, DbError> {
    let mut conn = db.connect().await?;

    let row = sqlx::query_as::<_, DepartmentRow>("SELECT id, name FROM departments WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut conn)
        .await?;

    conn.close().await?;
    Ok(row)
}

/// Rename a department.
///
/// Renaming onto a name another department already uses fails with
/// `DbError::UniqueViolation`; a missing id with `DbError::NotFound`.
pub async fn update_department(db: &Database, id: i64, name: &str) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("UPDATE departments SET name = ? WHERE id = ?")
        .bind(name)
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}

/// Delete a department. Doctors and appointments that referenced it keep
/// their rows with `department_id` cleared.
pub async fn delete_department(db: &Database, id: i64) -> Result<(), DbError> {
    let mut conn = db.connect().await?;

    let result = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(&mut conn)
        .await?;

    conn.close().await?;
    require_affected(result.rows_affected())
}
