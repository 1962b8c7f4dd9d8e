//! SQLite connection factory.
//!
//! There is no pool: every repository call opens its own
//! connection through [`Database::connect`], runs its statement(s) and
//! closes the connection before returning. Concurrent callers are
//! serialized by SQLite's file locking.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::ConnectOptions;
use tracing::debug;

use crate::DbError;

/// How long a connection waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the on-disk store. Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Point at the SQLite file at `path`, creating it on first connect.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);
        Self { path, options }
    }

    /// Location of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection for a single unit of work.
    pub async fn connect(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.path.display(), "opening connection");
        let conn = self.options.connect().await?;
        Ok(conn)
    }
}
