//! Imagestore-DB: Database schema, migrations, and query operations
//!
//! This crate provides database functionality for imagestore using SQLite
//! with rusqlite and r2d2 connection pooling. Image payloads are stored as
//! BLOB columns next to their metadata.
//!
//! # Modules
//!
//! - `migrations` - Database schema migrations
//! - `pool` - Connection pool management
//! - `models` - Rust models matching database schema
//! - `queries` - Database query operations
//!
//! # Example
//!
//! ```no_run
//! use imagestore_db::models::ImageFile;
//! use imagestore_db::pool::{init_pool, get_conn};
//! use imagestore_db::queries::image_files;
//!
//! let pool = init_pool("/var/lib/imagestore/db.sqlite").unwrap();
//! let conn = get_conn(&pool).unwrap();
//!
//! let image = ImageFile::new("logo.png", "image/png", std::fs::read("logo.png").unwrap());
//! let id = image_files::save_or_update(&conn, &image).unwrap();
//! println!("Stored image file: {}", id);
//! ```

pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
