//! SQLite tracking store implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};

use super::schema;
use crate::{Error, Result};

/// How long a write waits on a locked database before failing
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Durable bookkeeping of file handling state and dependency edges.
///
/// Every write is an upsert, so re-running any operation with the same
/// arguments leaves the store as a single run would. Every read is a point
/// lookup; nothing is cached.
///
/// The session sits behind a mutex so one store can be shared by several
/// worker threads. It is released by [`TrackingStore::close`] or on drop.
pub struct TrackingStore {
    conn: Mutex<Connection>,
}

impl TrackingStore {
    /// Connect to a database file (creates if doesn't exist)
    pub fn connect(path: &Path) -> Result<Self> {
        Self::connect_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Connect with an explicit busy timeout for contended writes
    pub fn connect_with_timeout(path: &Path, busy_timeout: Duration) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        tracing::debug!("Connected tracking store at {}", path.display());
        Self::prepare(conn)
    }

    /// Connect to an in-memory database (for testing)
    pub fn connect_in_memory() -> Result<Self> {
        Self::prepare(Connection::open_in_memory()?)
    }

    /// Create the tables and compile the write statements once
    fn prepare(conn: Connection) -> Result<Self> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, [])?;
        }
        for stmt in schema::all_write_statements() {
            conn.prepare_cached(stmt)?;
        }
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Release the session, reporting any error raised while closing
    pub fn close(self) -> Result<()> {
        let conn = self.conn.into_inner().map_err(|_| Error::SessionPoisoned)?;
        conn.close().map_err(|(_, e)| Error::Storage(e))
    }

    fn session(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::SessionPoisoned)
    }

    // ========== Lookups ==========

    /// True iff a handled_files row exists for exactly this key
    pub fn is_handled_file(&self, filename: &str, origin: &str) -> Result<bool> {
        Ok(self.get_handled_date(filename, origin)?.is_some())
    }

    /// True iff an imported_files row exists for exactly this key
    pub fn is_imported_file(&self, filename: &str, origin: &str) -> Result<bool> {
        Ok(self.get_import_date(filename, origin)?.is_some())
    }

    /// Date at which the file was first seen (or last re-seen)
    pub fn get_handled_date(&self, filename: &str, origin: &str) -> Result<Option<DateTime<Utc>>> {
        self.session()?
            .query_row(
                "SELECT import_date FROM handled_files WHERE filename = ?1 AND origin = ?2",
                [filename, origin],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Date at which the file was imported
    pub fn get_import_date(&self, filename: &str, origin: &str) -> Result<Option<DateTime<Utc>>> {
        self.session()?
            .query_row(
                "SELECT import_date FROM imported_files WHERE filename = ?1 AND origin = ?2",
                [filename, origin],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Identifier registered for a file, `None` if not registered yet
    pub fn get_uuid_by_filename(&self, filename: &str, origin: &str) -> Result<Option<String>> {
        self.session()?
            .query_row(
                "SELECT uuid FROM uuid_by_filename WHERE filename = ?1 AND origin = ?2",
                [filename, origin],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Filename registered for an identifier, `None` if not registered yet
    pub fn get_filename_by_uuid(&self, uuid: &str, origin: &str) -> Result<Option<String>> {
        self.session()?
            .query_row(
                "SELECT filename FROM filename_by_uuid WHERE uuid = ?1 AND origin = ?2",
                [uuid, origin],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Dependency list of a file.
    ///
    /// `None` means no row was ever written for `uuid`; `Some(vec![])` means
    /// a row exists and declares no dependencies.
    pub fn get_dependencies(&self, uuid: &str) -> Result<Option<Vec<String>>> {
        let raw: Option<String> = self
            .session()?
            .query_row(
                "SELECT dependencies FROM dependencies WHERE uuid = ?1",
                [uuid],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    // ========== Writes ==========

    /// Record that a file became available to the pipeline.
    ///
    /// Upserts handled_files, filename_by_uuid and uuid_by_filename, in that
    /// order. The three writes are not atomic: if this returns an error some
    /// of them may already be visible, and the caller must invoke it again
    /// with the same arguments before relying on any of the three tables.
    pub fn log_file_available(
        &self,
        filename: &str,
        uuid: &str,
        origin: &str,
        date: DateTime<Utc>,
    ) -> Result<()> {
        let conn = self.session()?;
        conn.prepare_cached(schema::INSERT_HANDLED_FILE)?
            .execute(params![filename, origin, date])?;
        conn.prepare_cached(schema::INSERT_FILENAME_BY_UUID)?
            .execute(params![uuid, filename, origin])?;
        conn.prepare_cached(schema::INSERT_UUID_BY_FILENAME)?
            .execute(params![filename, uuid, origin])?;
        tracing::debug!("File {} from {} available as {}", filename, origin, uuid);
        Ok(())
    }

    /// Record a successful import. Call only once the file is in the model.
    pub fn log_file_imported(&self, filename: &str, origin: &str, date: DateTime<Utc>) -> Result<()> {
        self.session()?
            .prepare_cached(schema::INSERT_IMPORTED_FILE)?
            .execute(params![filename, origin, date])?;
        tracing::debug!("File {} from {} imported", filename, origin);
        Ok(())
    }

    /// Replace the dependency list of `uuid` wholesale
    pub fn log_file_dependencies<S: AsRef<str>>(&self, uuid: &str, dependencies: &[S]) -> Result<()> {
        let dependencies: Vec<&str> = dependencies.iter().map(AsRef::as_ref).collect();
        let json = serde_json::to_string(&dependencies)?;
        self.session()?
            .prepare_cached(schema::INSERT_DEPENDENCIES)?
            .execute(params![uuid, json])?;
        tracing::info!("Add dependency between file {} and files {:?}", uuid, dependencies);
        Ok(())
    }

    // ========== Statistics ==========

    /// Row counts of every tracking table
    pub fn stats(&self) -> Result<TrackingStats> {
        let conn = self.session()?;
        let count = |table: &str| -> Result<usize> {
            let n: usize = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
            Ok(n)
        };

        Ok(TrackingStats {
            handled_files: count("handled_files")?,
            imported_files: count("imported_files")?,
            filename_by_uuid: count("filename_by_uuid")?,
            uuid_by_filename: count("uuid_by_filename")?,
            dependencies: count("dependencies")?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingStats {
    pub handled_files: usize,
    pub imported_files: usize,
    pub filename_by_uuid: usize,
    pub uuid_by_filename: usize,
    pub dependencies: usize,
}

impl TrackingStats {
    pub fn rows(&self) -> [(&'static str, usize); 5] {
        [
            ("Handled files", self.handled_files),
            ("Imported files", self.imported_files),
            ("Filename by uuid", self.filename_by_uuid),
            ("Uuid by filename", self.uuid_by_filename),
            ("Dependencies", self.dependencies),
        ]
    }
}

impl std::fmt::Display for TrackingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tracking Statistics:")?;
        for (label, value) in self.rows() {
            writeln!(f, "  {}: {}", label, value)?;
        }
        Ok(())
    }
}
