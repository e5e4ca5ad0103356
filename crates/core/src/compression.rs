//! Server-side image recompression for inline storage.
//!
//! Uploaded images are stored as `data:image/jpeg;base64,...` strings inside
//! documents, so each one is downscaled and re-encoded before it is
//! persisted. One extra pass at a lower JPEG quality is made when the first
//! result is still too long.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::encoding::to_data_url;
use crate::error::CoreError;

/// Maximum output width in pixels.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;
/// JPEG quality of the first pass.
pub const DEFAULT_QUALITY: u8 = 80;
/// JPEG quality of the second pass.
pub const DEFAULT_FALLBACK_QUALITY: u8 = 60;
/// Data-URL length above which the second pass is made.
pub const DEFAULT_MAX_ENCODED_LEN: usize = 300_000;

/// Tunables for [`compress_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionOptions {
    pub max_width: u32,
    pub quality: u8,
    pub fallback_quality: u8,
    pub max_encoded_len: usize,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            quality: DEFAULT_QUALITY,
            fallback_quality: DEFAULT_FALLBACK_QUALITY,
            max_encoded_len: DEFAULT_MAX_ENCODED_LEN,
        }
    }
}

/// Decode, downscale and re-encode an image as a JPEG data URL.
///
/// Returns the first-pass encoding when it fits within
/// `options.max_encoded_len`, otherwise a single re-encode at
/// `options.fallback_quality`.
pub fn compress_image(bytes: &[u8], options: &CompressionOptions) -> Result<String, CoreError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Validation(format!("Failed to process image: {e}")))?;

    let resized = fit_width(decoded, options.max_width);

    let first_pass = encode_jpeg_data_url(&resized, options.quality)?;
    if first_pass.len() <= options.max_encoded_len {
        return Ok(first_pass);
    }

    encode_jpeg_data_url(&resized, options.fallback_quality)
}

/// Shrink `img` to `max_width` keeping its aspect ratio. Images already
/// narrow enough are returned untouched.
pub fn fit_width(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max_width {
        return img;
    }

    let new_height = (u64::from(height) * u64::from(max_width) / u64::from(width)).max(1) as u32;
    img.resize_exact(max_width, new_height, FilterType::Triangle)
}

/// Encode `img` as a baseline JPEG at `quality` and wrap it in a data URL.
///
/// Alpha is discarded; JPEG has no transparency.
pub fn encode_jpeg_data_url(img: &DynamicImage, quality: u8) -> Result<String, CoreError> {
    let rgb = img.to_rgb8();
    let mut buf = Vec::new();

    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode_image(&rgb)
        .map_err(|e| CoreError::Internal(format!("JPEG encoding failed: {e}")))?;

    Ok(to_data_url("image/jpeg", &buf))
}
