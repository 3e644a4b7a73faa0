//! Image encoding for graver.
//!
//! This module provides functionality for:
//! - Encoding RGB images to JPEG with configurable quality
//! - Encoding RGB images to WebP, lossy with configurable quality when the
//!   `lossy-webp` feature is on
//! - Dispatching on [`OutputFormat`] and wrapping the result in an
//!   [`EncodedImage`]
//!
//! Both encoders are deterministic: the same pixels and quality always give
//! the same bytes.
//!
//! # Examples
//!
//! ```ignore
//! use graver_core::encode::encode_jpeg;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 85).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;
mod types;
mod webp;

pub use jpeg::encode_jpeg;
pub use types::{EncodeError, EncodedImage, OutputFormat, UnsupportedFormatError};
pub use self::webp::{encode_webp, WEBP_MAX_DIMENSION};

use image::RgbImage;

/// Encode an RGB image into `format` at `quality` (1-100).
///
/// # Errors
///
/// Returns an `EncodeError` if the encoder rejects the buffer.
pub fn encode(image: &RgbImage, format: OutputFormat, quality: u8) -> Result<EncodedImage, EncodeError> {
    let (width, height) = image.dimensions();
    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(image.as_raw(), width, height, quality)?,
        OutputFormat::WebP => encode_webp(image.as_raw(), width, height, quality)?,
    };

    Ok(EncodedImage {
        bytes,
        format,
        width,
        height,
    })
}
