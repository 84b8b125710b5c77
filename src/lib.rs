//! Imagestore - image upload and storage service
//!
//! This library crate exposes the upload service and configuration for the
//! binary and for integration testing.

pub mod config;
pub mod images;
