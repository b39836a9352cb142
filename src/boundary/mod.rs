//! Boundary service client
//!
//! Read-only access to the boundary catalog REST API (`/v1/...`):
//! - boundaries/{id} and boundaries/last
//! - tsos and business-processes reference lists
//!
//! Lookups never fail. Transport errors, timeouts and non-200 answers are
//! logged and come back as `None` or an empty collection, which callers
//! read as "not available right now" rather than "does not exist".

pub mod client;
pub mod model;

pub use client::{API_VERSION, BoundaryClient, DEFAULT_REQUEST_TIMEOUT};
pub use model::BoundaryInfo;
