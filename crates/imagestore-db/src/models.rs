//! Internal Rust models matching the database schema.
//!
//! This module provides strongly-typed Rust structures that map to database tables.

use chrono::{DateTime, Utc};
use imagestore_common::ImageFileId;
use serde::{Deserialize, Serialize};

/// A stored image file: original payload, optional thumbnail and metadata.
///
/// `width` and `height` are the decoded pixel dimensions of `file`. The
/// model does not enforce that on its own; the upload service fills them in
/// from a decode of the same bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageFile {
    pub id: ImageFileId,
    /// Original file name as supplied by the uploader.
    pub file_name: String,
    /// Declared MIME content type as supplied by the uploader.
    pub file_type: String,
    /// Original bytes, verbatim.
    #[serde(skip_serializing)]
    #[serde(default)]
    pub file: Vec<u8>,
    #[serde(skip_serializing)]
    #[serde(default)]
    pub thumbnail: Option<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl ImageFile {
    /// Build a new, not yet persisted image file.
    ///
    /// Dimensions start at zero and there is no thumbnail.
    pub fn new(
        file_name: impl Into<String>,
        file_type: impl Into<String>,
        file: impl Into<Vec<u8>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ImageFileId::new(),
            file_name: file_name.into(),
            file_type: file_type.into(),
            file: file.into(),
            thumbnail: None,
            width: 0,
            height: 0,
            created_at: now,
            modified_at: now,
        }
    }

    /// Size of the original payload in bytes.
    pub fn file_size(&self) -> u64 {
        self.file.len() as u64
    }

    /// Size of the thumbnail payload in bytes, if there is one.
    pub fn thumbnail_size(&self) -> Option<u64> {
        self.thumbnail.as_ref().map(|t| t.len() as u64)
    }
}

/// Metadata view of an [`ImageFile`] without the binary payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageFileSummary {
    pub id: ImageFileId,
    pub file_name: String,
    pub file_type: String,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
    pub thumbnail_size: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&ImageFile> for ImageFileSummary {
    fn from(image: &ImageFile) -> Self {
        Self {
            id: image.id,
            file_name: image.file_name.clone(),
            file_type: image.file_type.clone(),
            width: image.width,
            height: image.height,
            file_size: image.file_size(),
            thumbnail_size: image.thumbnail_size(),
            created_at: image.created_at,
            modified_at: image.modified_at,
        }
    }
}
