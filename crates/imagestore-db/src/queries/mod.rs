//! Database query modules.
//!
//! - image_files: Stored image payloads and their metadata

pub mod image_files;
