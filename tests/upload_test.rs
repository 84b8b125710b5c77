//! Integration tests for the upload-and-persist operation.

mod common;

use common::{jpeg_bytes, png_bytes, rgba_png_bytes, TestHarness};
use image::{GenericImageView, ImageFormat};
use imagestore::images::UploadedFile;

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[test]
fn dimensions_match_an_independent_decode() {
    let h = TestHarness::new();

    for (name, data) in [
        ("a.png", png_bytes(31, 17)),
        ("b.jpg", jpeg_bytes(200, 120)),
        ("c.png", rgba_png_bytes(1, 1)),
    ] {
        let upload = UploadedFile::new(name, "image/whatever", data.clone());
        let stored = h.service.upload_image(&upload, false, 0).unwrap();

        let independent = image::load_from_memory(&data).unwrap();
        assert_eq!((stored.width, stored.height), independent.dimensions(), "{}", name);

        let loaded = h.service.get_image(stored.id).unwrap().unwrap();
        assert_eq!((loaded.width, loaded.height), independent.dimensions(), "{}", name);
    }
}

#[test]
fn file_name_and_content_type_are_stored_verbatim() {
    let h = TestHarness::new();
    let upload = UploadedFile::new(
        "Holiday Photo (1).PNG",
        "image/png; charset=binary",
        png_bytes(8, 8),
    );

    let stored = h.service.upload_image(&upload, true, 4).unwrap();
    let loaded = h.service.get_image(stored.id).unwrap().unwrap();

    assert_eq!(loaded.file_name, "Holiday Photo (1).PNG");
    assert_eq!(loaded.file_type, "image/png; charset=binary");
}

#[test]
fn original_bytes_are_stored_verbatim() {
    let h = TestHarness::new();
    let data = jpeg_bytes(50, 50);
    let upload = UploadedFile::new("x.jpg", "image/jpeg", data.clone());

    let stored = h.service.upload_image(&upload, true, 10).unwrap();
    let loaded = h.service.get_image(stored.id).unwrap().unwrap();

    assert_eq!(loaded.file, data);
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

#[test]
fn no_thumbnail_when_flag_is_false() {
    let h = TestHarness::new();

    for dimension in [0, 1, 50, 10_000] {
        let upload = UploadedFile::new("x.png", "image/png", png_bytes(20, 10));
        let stored = h.service.upload_image(&upload, false, dimension).unwrap();
        assert!(stored.thumbnail.is_none());

        let summary = h.service.get_summary(stored.id).unwrap().unwrap();
        assert_eq!(summary.thumbnail_size, None);
    }
}

#[test]
fn thumbnail_longer_edge_equals_requested_dimension() {
    let h = TestHarness::new();

    for (width, height, dimension) in [(300, 200, 60), (200, 300, 60), (64, 64, 16), (7, 3, 21)] {
        let upload = UploadedFile::new("x.png", "image/png", png_bytes(width, height));
        let stored = h.service.upload_image(&upload, true, dimension).unwrap();

        let thumbnail = stored.thumbnail.as_deref().unwrap();
        assert_ne!(thumbnail, stored.file.as_slice());

        let decoded = image::load_from_memory(thumbnail).unwrap();
        let (tw, th) = decoded.dimensions();
        assert_eq!(tw.max(th), dimension, "{}x{} -> {}", width, height, dimension);
    }
}

#[test]
fn thumbnail_is_encoded_like_the_file_extension() {
    let h = TestHarness::new();

    let upload = UploadedFile::new("photo.jpeg", "image/jpeg", png_bytes(40, 40));
    let stored = h.service.upload_image(&upload, true, 20).unwrap();
    let thumbnail = stored.thumbnail.unwrap();
    assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Jpeg);

    let upload = UploadedFile::new("photo.png", "image/png", jpeg_bytes(40, 40));
    let stored = h.service.upload_image(&upload, true, 20).unwrap();
    let thumbnail = stored.thumbnail.unwrap();
    assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Png);
}

#[test]
fn dot_file_name_is_its_own_extension() {
    let h = TestHarness::new();
    let upload = UploadedFile::new(".png", "image/png", jpeg_bytes(20, 10));

    let stored = h.service.upload_image(&upload, true, 10).unwrap();
    let thumbnail = stored.thumbnail.unwrap();
    assert_eq!(image::guess_format(&thumbnail).unwrap(), ImageFormat::Png);
}

#[test]
fn translucent_png_thumbnail_as_jpeg() {
    let h = TestHarness::new();
    let upload = UploadedFile::new("overlay.jpg", "image/jpeg", rgba_png_bytes(30, 30));

    let stored = h.service.upload_image(&upload, true, 15).unwrap();
    let decoded = image::load_from_memory(stored.thumbnail.as_deref().unwrap()).unwrap();
    assert_eq!(decoded.dimensions(), (15, 15));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn zero_byte_upload_fails_and_persists_nothing() {
    let h = TestHarness::new();
    let upload = UploadedFile::new("empty.png", "image/png", Vec::new());

    let err = h.service.upload_image(&upload, false, 0).unwrap_err();
    assert!(err.to_string().starts_with("Could not create the Image in DB: "));
    assert_eq!(h.stored_count(), 0);
}

#[test]
fn truncated_image_fails_and_persists_nothing() {
    let h = TestHarness::new();
    let mut data = png_bytes(64, 64);
    data.truncate(data.len() / 2);
    let upload = UploadedFile::new("half.png", "image/png", data);

    assert!(h.service.upload_image(&upload, true, 10).is_err());
    assert!(h.service.upload_image(&upload, false, 10).is_err());
    assert_eq!(h.stored_count(), 0);
}

#[test]
fn non_image_data_fails_and_persists_nothing() {
    let h = TestHarness::new();
    let upload = UploadedFile::new("notes.txt", "text/plain", b"hello, world".to_vec());

    let err = h.service.upload_image(&upload, false, 0).unwrap_err();
    assert!(err.message().contains("Failed to decode image"));
    assert_eq!(h.stored_count(), 0);
}

#[test]
fn thumbnail_in_unknown_format_fails_and_persists_nothing() {
    let h = TestHarness::new();
    let upload = UploadedFile::new("photo.unknown", "image/png", png_bytes(10, 10));

    let err = h.service.upload_image(&upload, true, 5).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Could not create the Image in DB: Error on resizing an image: "));
    assert_eq!(h.stored_count(), 0);
}

#[test]
fn oversized_thumbnail_fails_and_persists_nothing() {
    let h = TestHarness::new();
    let upload = UploadedFile::new("tiny.png", "image/png", png_bytes(2, 1));

    let err = h.service.upload_image(&upload, true, u32::MAX).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Could not create the Image in DB: Error on resizing an image: "));
    assert_eq!(h.stored_count(), 0);

    // The same upload without a thumbnail ignores the dimension
    assert!(h.service.upload_image(&upload, false, u32::MAX).is_ok());
    assert_eq!(h.stored_count(), 1);
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

#[test]
fn list_and_find_uploaded_images() {
    let h = TestHarness::new();

    for name in ["a.png", "b.png", "a.png"] {
        let upload = UploadedFile::new(name, "image/png", png_bytes(4, 4));
        h.service.upload_image(&upload, false, 0).unwrap();
    }

    assert_eq!(h.service.list_images().unwrap().len(), 3);
    assert_eq!(h.service.find_by_file_name("a.png").unwrap().len(), 2);
    assert!(h.service.find_by_file_name("c.png").unwrap().is_empty());
}

#[test]
fn services_sharing_a_pool_see_the_same_images() {
    let h = TestHarness::new();
    let other = h.service.clone();

    let upload = UploadedFile::new("shared.png", "image/png", png_bytes(4, 4));
    let stored = h.service.upload_image(&upload, false, 0).unwrap();

    assert!(other.get_summary(stored.id).unwrap().is_some());
}
