//! Storage Layer - SQLite-backed tracking store
//!
//! One database plays the `cgmes_assembling` keyspace, with tables:
//! - handled_files(filename, origin, import_date)
//! - imported_files(filename, origin, import_date)
//! - filename_by_uuid(uuid, origin, filename)
//! - uuid_by_filename(filename, origin, uuid)
//! - dependencies(uuid, dependencies)

pub mod schema;
pub mod sqlite;

pub use sqlite::{TrackingStats, TrackingStore};
