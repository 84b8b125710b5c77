//! The uploaded file as handed to the image service.

use std::path::Path;

use bytes::Bytes;
use image::ImageFormat;
use imagestore_common::{Error, Result};

/// Content type used when none is declared and none can be guessed.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file: payload plus what the client declared about it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original file name as sent by the client.
    pub file_name: String,
    /// Declared MIME content type.
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Read an upload from disk.
    ///
    /// The file name is the final component of `path`. When `content_type` is
    /// `None` it is guessed from the extension, falling back to
    /// [`FALLBACK_CONTENT_TYPE`].
    pub fn from_path(path: &Path, content_type: Option<&str>) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid_input(format!("Not a file path: {}", path.display())))?
            .to_string();

        let content_type = match content_type {
            Some(ct) => ct.to_string(),
            None => guess_content_type(path).to_string(),
        };

        let data = std::fs::read(path)?;

        Ok(Self::new(file_name, content_type, data))
    }
}

/// Guess a MIME type from the extension of a path.
pub fn guess_content_type(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_CONTENT_TYPE)
}
