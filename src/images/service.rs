//! Image file service coordinating decoding, thumbnails and persistence.
//!
//! Provides the upload operation that turns an [`UploadedFile`] into a stored
//! [`ImageFile`], and the lookup/delete operations on stored image files.

use anyhow::Context;
use chrono::Utc;
use image::imageops::FilterType;
use imagestore_common::paths::file_extension;
use imagestore_common::{ImageFileId, Result};
use imagestore_db::models::{ImageFile, ImageFileSummary};
use imagestore_db::pool::{get_conn, DbPool};
use imagestore_db::queries::image_files;

use super::thumbnail::{scale_decoded, DEFAULT_FILTER};
use super::upload::UploadedFile;

/// Failure of an upload.
///
/// Every cause (decoding, thumbnail scaling, persistence) is reported the same
/// way; only the message tells them apart.
#[derive(Debug, thiserror::Error)]
#[error("Could not create the Image in DB: {message}")]
pub struct UploadError {
    message: String,
}

impl UploadError {
    /// The underlying cause, without the prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// High-level image file service backed by the database pool.
#[derive(Clone)]
pub struct ImageFileService {
    pool: DbPool,
    filter: FilterType,
}

impl ImageFileService {
    /// Create a new `ImageFileService` using the default resampling filter.
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            filter: DEFAULT_FILTER,
        }
    }

    /// Use a different resampling filter for thumbnails.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Persist an uploaded image.
    ///
    /// The original bytes are stored verbatim. When `create_thumbnail` is set
    /// a thumbnail whose longer edge is `dimensions` pixels is stored as well,
    /// encoded in the format of the uploaded file name's extension. Width and
    /// height come from decoding the original.
    ///
    /// # Arguments
    ///
    /// * `file` - The uploaded file
    /// * `create_thumbnail` - Whether to generate a thumbnail
    /// * `dimensions` - Thumbnail size; ignored when `create_thumbnail` is false
    ///
    /// # Returns
    ///
    /// The persisted image file. On error nothing has been written.
    ///
    /// # Errors
    ///
    /// The original is decoded before any thumbnail work, so undecodable
    /// bytes report `Failed to decode image: ...` after the prefix even when
    /// a thumbnail was requested. Thumbnail failures report
    /// `Error on resizing an image: ...`.
    pub fn upload_image(
        &self,
        file: &UploadedFile,
        create_thumbnail: bool,
        dimensions: u32,
    ) -> std::result::Result<ImageFile, UploadError> {
        self.store_upload(file, create_thumbnail, dimensions)
            .map_err(|e| {
                let message = format!("{:#}", e);
                tracing::warn!("Upload of {} failed: {}", file.file_name, message);
                UploadError { message }
            })
    }

    fn store_upload(
        &self,
        file: &UploadedFile,
        create_thumbnail: bool,
        dimensions: u32,
    ) -> anyhow::Result<ImageFile> {
        let decoded = image::load_from_memory(&file.data).context("Failed to decode image")?;

        let mut image_file = ImageFile::new(&file.file_name, &file.content_type, file.data.to_vec());

        if create_thumbnail {
            let format = file_extension(&file.file_name).unwrap_or_default();
            let thumbnail = scale_decoded(&decoded, &format, dimensions, self.filter)?;
            tracing::debug!(
                "Created {} byte thumbnail for {} ({}px)",
                thumbnail.len(),
                file.file_name,
                dimensions
            );
            image_file.thumbnail = Some(thumbnail);
        }

        image_file.width = decoded.width();
        image_file.height = decoded.height();

        let conn = get_conn(&self.pool)?;
        image_files::save_or_update(&conn, &image_file)?;

        tracing::info!(
            "Stored image {} ({}, {}x{}, {} bytes) as {}",
            image_file.file_name,
            image_file.file_type,
            image_file.width,
            image_file.height,
            image_file.file_size(),
            image_file.id
        );

        Ok(image_file)
    }

    /// Insert or update an image file, stamping its modification time.
    pub fn save_or_update(&self, image_file: &mut ImageFile) -> Result<ImageFileId> {
        image_file.modified_at = Utc::now();
        let conn = get_conn(&self.pool)?;
        image_files::save_or_update(&conn, image_file)
    }

    /// Load an image file with its payloads.
    pub fn get_image(&self, id: ImageFileId) -> Result<Option<ImageFile>> {
        let conn = get_conn(&self.pool)?;
        image_files::get_image_file(&conn, id)
    }

    /// Load the metadata of an image file.
    pub fn get_summary(&self, id: ImageFileId) -> Result<Option<ImageFileSummary>> {
        let conn = get_conn(&self.pool)?;
        image_files::get_summary(&conn, id)
    }

    /// List the metadata of all stored image files, newest first.
    pub fn list_images(&self) -> Result<Vec<ImageFileSummary>> {
        let conn = get_conn(&self.pool)?;
        image_files::list_image_files(&conn)
    }

    /// Find stored image files by their exact original file name.
    pub fn find_by_file_name(&self, file_name: &str) -> Result<Vec<ImageFileSummary>> {
        let conn = get_conn(&self.pool)?;
        image_files::find_by_file_name(&conn, file_name)
    }

    /// Delete an image file. Returns `false` if it did not exist.
    pub fn delete_image(&self, id: ImageFileId) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        let deleted = image_files::delete_image_file(&conn, id)?;
        if deleted {
            tracing::info!("Deleted image {}", id);
        }
        Ok(deleted)
    }
}
