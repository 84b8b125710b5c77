//! Image upload and storage module.
//!
//! This module turns uploaded files into stored image records: it decodes the
//! upload to read its dimensions, optionally renders a thumbnail, and persists
//! both payloads through the database layer from `imagestore_db`.

mod service;
mod thumbnail;
mod upload;

pub use service::{ImageFileService, UploadError};
pub use thumbnail::{scale_decoded, scale_image, ScaleError, DEFAULT_FILTER};
pub use upload::{guess_content_type, UploadedFile, FALLBACK_CONTENT_TYPE};
