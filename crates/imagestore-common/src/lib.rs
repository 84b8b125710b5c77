//! Imagestore-Common: Shared types and utilities.
//!
//! This crate provides common functionality used across imagestore:
//!
//! - **Typed IDs**: Type-safe UUID wrapper for stored image files
//! - **Path Utilities**: File name extension handling and image detection
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use imagestore_common::{ImageFileId, Error, Result};
//! use imagestore_common::paths::file_extension;
//!
//! let id = ImageFileId::new();
//! assert_eq!(file_extension("poster.PNG").as_deref(), Some("png"));
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("image file"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod paths;

pub use error::{Error, Result};
pub use ids::*;
