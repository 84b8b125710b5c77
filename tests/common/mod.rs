//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], an [`ImageFileService`] over an in-memory
//! database, and helpers that encode small synthetic images.

#![allow(dead_code)]

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use imagestore::images::ImageFileService;
use imagestore_db::pool::{init_memory_pool, DbPool};

/// Test harness wrapping an [`ImageFileService`] backed by an in-memory database.
pub struct TestHarness {
    pub service: ImageFileService,
    pub db: DbPool,
}

impl TestHarness {
    pub fn new() -> Self {
        let db = init_memory_pool().expect("failed to create in-memory pool");
        let service = ImageFileService::new(db.clone());
        Self { service, db }
    }

    /// Number of rows in the image_files table.
    pub fn stored_count(&self) -> u64 {
        let conn = self.db.get().unwrap();
        imagestore_db::queries::image_files::count_image_files(&conn).unwrap()
    }
}

/// A gradient image so encoders cannot collapse it to a trivial payload.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90])
    }))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient(width, height), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&gradient(width, height), ImageFormat::Jpeg)
}

/// A PNG with a translucent alpha channel.
pub fn rgba_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 100]));
    encode(&DynamicImage::ImageRgba8(img), ImageFormat::Png)
}
