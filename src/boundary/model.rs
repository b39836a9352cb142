//! Boundary payloads

use serde::Deserialize;

/// A boundary file fetched from the boundary service.
///
/// Handed to the caller as is; the tracking store never persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryInfo {
    pub id: String,
    pub filename: String,
    /// Raw file content (UTF-8 bytes of the `boundary` field)
    pub boundary: Vec<u8>,
}

impl BoundaryInfo {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, boundary: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            boundary: boundary.into(),
        }
    }

    /// Content size in bytes
    pub fn len(&self) -> usize {
        self.boundary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }
}

/// Wire shape of `{id, filename, boundary}`
#[derive(Debug, Deserialize)]
pub(crate) struct BoundaryDto {
    id: String,
    filename: String,
    boundary: String,
}

impl From<BoundaryDto> for BoundaryInfo {
    fn from(dto: BoundaryDto) -> Self {
        Self {
            id: dto.id,
            filename: dto.filename,
            boundary: dto.boundary.into_bytes(),
        }
    }
}
