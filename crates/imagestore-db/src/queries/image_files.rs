//! Image file database queries.
//!
//! This module is the data-access object for stored image files: save or
//! update, lookups with and without the binary payloads, listing and delete.

use chrono::{DateTime, Utc};
use imagestore_common::{Error, ImageFileId, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::models::{ImageFile, ImageFileSummary};

/// Columns selected for a summary row, in the order `parse_summary_row` expects.
const SUMMARY_COLUMNS: &str = "id, file_name, file_type, width, height,
    length(file), length(thumbnail), created_at, modified_at";

fn parse_id(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<ImageFileId> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw)
        .map(ImageFileId::from)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_timestamp(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Parse a full image file from a database row.
///
/// Expects columns in order: id, file_name, file_type, file, thumbnail,
/// width, height, created_at, modified_at.
fn parse_image_file_row(row: &rusqlite::Row) -> rusqlite::Result<ImageFile> {
    Ok(ImageFile {
        id: parse_id(row, 0)?,
        file_name: row.get(1)?,
        file_type: row.get(2)?,
        file: row.get(3)?,
        thumbnail: row.get(4)?,
        width: row.get(5)?,
        height: row.get(6)?,
        created_at: parse_timestamp(row, 7)?,
        modified_at: parse_timestamp(row, 8)?,
    })
}

/// Parse a summary from a row selected with [`SUMMARY_COLUMNS`].
fn parse_summary_row(row: &rusqlite::Row) -> rusqlite::Result<ImageFileSummary> {
    Ok(ImageFileSummary {
        id: parse_id(row, 0)?,
        file_name: row.get(1)?,
        file_type: row.get(2)?,
        width: row.get(3)?,
        height: row.get(4)?,
        file_size: row.get(5)?,
        thumbnail_size: row.get(6)?,
        created_at: parse_timestamp(row, 7)?,
        modified_at: parse_timestamp(row, 8)?,
    })
}

/// Insert an image file, or update it in place if its ID already exists.
///
/// On update every column except `id` and `created_at` is overwritten,
/// including a thumbnail that is now `None`.
///
/// # Returns
///
/// * `Ok(ImageFileId)` - The ID of the stored image file
/// * `Err(Error)` - If a database error occurs
pub fn save_or_update(conn: &Connection, image: &ImageFile) -> Result<ImageFileId> {
    conn.execute(
        "INSERT INTO image_files
            (id, file_name, file_type, file, thumbnail, width, height, created_at, modified_at)
         VALUES
            (:id, :file_name, :file_type, :file, :thumbnail, :width, :height, :created_at, :modified_at)
         ON CONFLICT(id) DO UPDATE SET
            file_name = excluded.file_name,
            file_type = excluded.file_type,
            file = excluded.file,
            thumbnail = excluded.thumbnail,
            width = excluded.width,
            height = excluded.height,
            modified_at = excluded.modified_at",
        rusqlite::named_params! {
            ":id": image.id.to_string(),
            ":file_name": &image.file_name,
            ":file_type": &image.file_type,
            ":file": &image.file,
            ":thumbnail": &image.thumbnail,
            ":width": image.width,
            ":height": image.height,
            ":created_at": image.created_at.to_rfc3339(),
            ":modified_at": image.modified_at.to_rfc3339(),
        },
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(image.id)
}

/// Get an image file, payloads included, by ID.
///
/// # Returns
///
/// * `Ok(Some(ImageFile))` - The image file if found
/// * `Ok(None)` - If the image file does not exist
/// * `Err(Error)` - If a database error occurs
pub fn get_image_file(conn: &Connection, id: ImageFileId) -> Result<Option<ImageFile>> {
    conn.query_row(
        "SELECT id, file_name, file_type, file, thumbnail, width, height, created_at, modified_at
         FROM image_files WHERE id = :id",
        rusqlite::named_params! { ":id": id.to_string() },
        parse_image_file_row,
    )
    .optional()
    .map_err(|e| Error::database(e.to_string()))
}

/// Get the metadata of an image file without loading its payloads.
pub fn get_summary(conn: &Connection, id: ImageFileId) -> Result<Option<ImageFileSummary>> {
    conn.query_row(
        &format!("SELECT {} FROM image_files WHERE id = :id", SUMMARY_COLUMNS),
        rusqlite::named_params! { ":id": id.to_string() },
        parse_summary_row,
    )
    .optional()
    .map_err(|e| Error::database(e.to_string()))
}

/// List the metadata of all image files, newest first.
pub fn list_image_files(conn: &Connection) -> Result<Vec<ImageFileSummary>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM image_files ORDER BY created_at DESC, id",
            SUMMARY_COLUMNS
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let images = stmt
        .query_map([], parse_summary_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(images)
}

/// Find image files by their exact original file name, newest first.
pub fn find_by_file_name(conn: &Connection, file_name: &str) -> Result<Vec<ImageFileSummary>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {} FROM image_files WHERE file_name = :file_name
             ORDER BY created_at DESC, id",
            SUMMARY_COLUMNS
        ))
        .map_err(|e| Error::database(e.to_string()))?;

    let images = stmt
        .query_map(
            rusqlite::named_params! { ":file_name": file_name },
            parse_summary_row,
        )
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(images)
}

/// Delete an image file by ID.
///
/// # Returns
///
/// * `Ok(true)` - If the image file was deleted
/// * `Ok(false)` - If the image file did not exist
/// * `Err(Error)` - If a database error occurs
pub fn delete_image_file(conn: &Connection, id: ImageFileId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM image_files WHERE id = :id",
            rusqlite::named_params! { ":id": id.to_string() },
        )
        .map_err(|e| Error::database(e.to_string()))?;

    Ok(rows_affected > 0)
}

/// Count stored image files.
pub fn count_image_files(conn: &Connection) -> Result<u64> {
    conn.query_row("SELECT COUNT(*) FROM image_files", [], |row| row.get(0))
        .map_err(|e| Error::database(e.to_string()))
}
