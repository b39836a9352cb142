//! # cgmes-assembling - file tracking for CGMES model assembling
//!
//! Bookkeeping for a pipeline that assembles grid models out of CGMES/CIM
//! files coming from several origins (TSOs).
//!
//! The crate provides:
//! - A tracking store recording which files were handled, which were
//!   imported, the filename/uuid indexes per origin and the dependency
//!   list of each file
//! - A blocking client for the boundary service REST API (boundary files,
//!   TSO and business process lists)
//! - TOML configuration shared by both and by the command-line binary

pub mod boundary;
pub mod config;
pub mod storage;
pub mod ui;

// Re-exports for convenient access
pub use boundary::{BoundaryClient, BoundaryInfo};
pub use config::AssemblingConfig;
pub use storage::{TrackingStats, TrackingStore};

/// Result type alias for tracking and boundary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types surfaced to callers.
///
/// Only store access and client construction fail. Boundary lookups degrade
/// to empty results instead of returning these.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid boundary service URL: {0}")]
    InvalidServiceUrl(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Store session poisoned by a panicking caller")]
    SessionPoisoned,
}
