//! Typed ID wrappers.
//!
//! Stored records are keyed by UUIDs; the newtype keeps an image file ID from
//! being confused with any other string or UUID floating around.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Unique identifier for a stored image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageFileId(Uuid);

impl ImageFileId {
    /// Generate a new random image file ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageFileId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ImageFileId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<ImageFileId> for Uuid {
    fn from(id: ImageFileId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ImageFileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImageFileId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|e| Error::invalid_input(format!("Invalid image file id '{}': {}", s, e)))
    }
}
