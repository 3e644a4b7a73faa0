//! WebP encoding.
//!
//! With the `lossy-webp` feature (on by default) output is lossy WebP from
//! libwebp at its slowest, smallest method. The `image` crate only writes
//! lossless WebP, which is larger than the JPEG originals for photographed
//! engravings.
//!
//! libwebp is C and does not build for `wasm32-unknown-unknown`, so the WASM
//! bindings turn the feature off. WebP output then falls back to the pure
//! Rust lossless encoder in `image` and `quality` is ignored.

#[cfg(not(feature = "lossy-webp"))]
use image::{codecs::webp::WebPEncoder, ExtendedColorType, ImageEncoder};

use super::types::check_rgb_buffer;
use super::{EncodeError, OutputFormat};

/// Largest width or height a WebP bitstream can describe.
pub const WEBP_MAX_DIMENSION: u32 = 16383;

/// libwebp compression method; 6 is the slowest and smallest.
#[cfg(feature = "lossy-webp")]
const WEBP_METHOD: i32 = 6;

/// Encode RGB pixel data to WebP bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels, at most [`WEBP_MAX_DIMENSION`]
/// * `height` - Image height in pixels, at most [`WEBP_MAX_DIMENSION`]
/// * `quality` - WebP quality (1-100), clamped like the JPEG encoder
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    check_rgb_buffer(pixels, width, height)?;

    if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
        return Err(EncodeError::DimensionsTooLarge {
            format: OutputFormat::WebP,
            width,
            height,
            limit: WEBP_MAX_DIMENSION,
        });
    }

    encode_rgb(pixels, width, height, quality.clamp(1, 100))
}

#[cfg(feature = "lossy-webp")]
fn encode_rgb(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let failed = |message: String| EncodeError::EncodingFailed {
        format: OutputFormat::WebP,
        message,
    };

    let mut config = ::webp::WebPConfig::new()
        .map_err(|_| failed("libwebp rejected its default configuration".to_string()))?;
    config.lossless = 0;
    config.quality = f32::from(quality);
    config.method = WEBP_METHOD;

    let memory = ::webp::Encoder::from_rgb(pixels, width, height)
        .encode_advanced(&config)
        .map_err(|e| failed(format!("{:?}", e)))?;

    Ok(memory.to_vec())
}

#[cfg(not(feature = "lossy-webp"))]
fn encode_rgb(pixels: &[u8], width: u32, height: u32, _quality: u8) -> Result<Vec<u8>, EncodeError> {
    let mut buffer = Vec::new();
    WebPEncoder::new_lossless(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::WebP,
            message: e.to_string(),
        })?;
    Ok(buffer)
}
