//! Path utilities for file names and image extensions.
//!
//! Uploaded files arrive with the client's original file name. The extension
//! of that name decides the encoding of generated thumbnails, so it is
//! extracted here in one place.

use std::path::Path;

/// List of supported image file extensions.
const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff", "ico",
];

/// Get the lowercased extension of a file name.
///
/// The extension is the text after the last `.` of the final path component,
/// so a name that is only an extension (`.png`) yields that extension.
/// Returns `None` when the name has no `.` or nothing follows it.
///
/// # Examples
///
/// ```
/// use imagestore_common::paths::file_extension;
///
/// assert_eq!(file_extension("poster.JPG").as_deref(), Some("jpg"));
/// assert_eq!(file_extension("archive.tar.gz").as_deref(), Some("gz"));
/// assert_eq!(file_extension(".png").as_deref(), Some("png"));
/// assert_eq!(file_extension("README"), None);
/// ```
pub fn file_extension(file_name: &str) -> Option<String> {
    let name = Path::new(file_name).file_name()?.to_str()?;
    let (_, ext) = name.rsplit_once('.')?;
    (!ext.is_empty()).then(|| ext.to_lowercase())
}

/// Check if a path has an image file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use imagestore_common::paths::is_image_file;
///
/// assert!(is_image_file(Path::new("poster.jpg")));
/// assert!(is_image_file(Path::new("/path/to/image.PNG")));
/// assert!(!is_image_file(Path::new("notes.txt")));
/// ```
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get the list of image file extensions.
pub fn image_extensions() -> &'static [&'static str] {
    IMAGE_EXTENSIONS
}
