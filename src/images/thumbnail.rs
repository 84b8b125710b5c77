//! Thumbnail generation.
//!
//! A thumbnail is the source image resized so that its longer edge equals the
//! requested size, keeping the aspect ratio, and encoded in the format named
//! by a file extension (usually the extension of the uploaded file).

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

/// Resampling filter used when none is configured.
pub const DEFAULT_FILTER: FilterType = FilterType::Lanczos3;

/// Failure while decoding, resizing or encoding a thumbnail.
#[derive(Debug, thiserror::Error)]
#[error("Error on resizing an image: {0}")]
pub struct ScaleError(String);

impl ScaleError {
    fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Scale encoded image bytes to a thumbnail.
///
/// # Arguments
///
/// * `image_bytes` - Encoded source image
/// * `output_format` - File extension naming the output encoding (`png`, `jpg`, ...)
/// * `output_size` - Target length of the longer edge in pixels
///
/// # Returns
///
/// The encoded thumbnail bytes.
pub fn scale_image(
    image_bytes: &[u8],
    output_format: &str,
    output_size: u32,
) -> Result<Vec<u8>, ScaleError> {
    let image = image::load_from_memory(image_bytes).map_err(|e| ScaleError::new(e.to_string()))?;

    scale_decoded(&image, output_format, output_size, DEFAULT_FILTER)
}

/// Scale an already decoded image to a thumbnail.
///
/// Sources smaller than `output_size` are upscaled.
pub fn scale_decoded(
    image: &DynamicImage,
    output_format: &str,
    output_size: u32,
    filter: FilterType,
) -> Result<Vec<u8>, ScaleError> {
    let format = output_image_format(output_format)?;

    if output_size == 0 {
        return Err(ScaleError::new("thumbnail size must be greater than zero"));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(ScaleError::new("source image has no pixels"));
    }

    let (width, height) = fit_within(image.width(), image.height(), output_size);
    check_allocation(image, width, height)?;

    let resized = image.resize(output_size, output_size, filter);
    let resized = prepare_for_encoding(resized, format);

    tracing::trace!(
        "Scaled {}x{} image to {}x{} ({:?})",
        image.width(),
        image.height(),
        resized.width(),
        resized.height(),
        format
    );

    let mut buf = Cursor::new(Vec::new());
    resized
        .write_to(&mut buf, format)
        .map_err(|e| ScaleError::new(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Dimensions of a `width`x`height` image scaled so its longer edge is `size`.
///
/// Same rounding as `DynamicImage::resize`, in `u64` so huge sizes cannot wrap.
fn fit_within(width: u32, height: u32, size: u32) -> (u64, u64) {
    let ratio = f64::min(
        f64::from(size) / f64::from(width),
        f64::from(size) / f64::from(height),
    );
    let scale = |edge: u32| ((f64::from(edge) * ratio).round() as u64).max(1);
    (scale(width), scale(height))
}

/// Reject resizes whose buffers would exceed the decoder allocation limit.
///
/// Resampling filters first write a `source width x target height` buffer of
/// four `f32` channels, then the output buffer in the source color type.
fn check_allocation(image: &DynamicImage, width: u64, height: u64) -> Result<(), ScaleError> {
    const INTERMEDIATE_BYTES_PER_PIXEL: u64 = 16;

    let limit = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    let intermediate = u64::from(image.width())
        .saturating_mul(height)
        .saturating_mul(INTERMEDIATE_BYTES_PER_PIXEL);
    let output = width
        .saturating_mul(height)
        .saturating_mul(u64::from(image.color().bytes_per_pixel()));

    let needed = intermediate.max(output);
    if needed > limit {
        return Err(ScaleError::new(format!(
            "thumbnail of {}x{} pixels is too large ({} bytes needed, limit is {})",
            width, height, needed, limit
        )));
    }
    Ok(())
}

/// Resolve a file extension to an image format.
fn output_image_format(output_format: &str) -> Result<ImageFormat, ScaleError> {
    let ext = output_format.trim().trim_start_matches('.');
    if ext.is_empty() {
        return Err(ScaleError::new("no output format given"));
    }

    ImageFormat::from_extension(ext)
        .ok_or_else(|| ScaleError::new(format!("unsupported output format '{}'", ext)))
}

/// Convert pixel data to a layout the target encoder accepts.
///
/// JPEG has no alpha channel, and most encoders other than PNG and TIFF only
/// take 8-bit samples.
fn prepare_for_encoding(image: DynamicImage, format: ImageFormat) -> DynamicImage {
    match format {
        ImageFormat::Png | ImageFormat::Tiff => image,
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ if image.color().has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}
