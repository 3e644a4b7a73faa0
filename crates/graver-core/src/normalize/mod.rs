//! Orientation-normalizing resizer.
//!
//! [`normalize`] turns one decoded source image into one encoded output in a
//! single synchronous pass:
//!
//! 1. Orientation correction from the EXIF tag (or a caller override)
//! 2. Alpha flattening onto the policy background
//! 3. Bounding-box downscale with Lanczos3 (never upscales)
//! 4. JPEG or WebP encoding at the policy quality
//!
//! The function holds no state, so calls for different images can run on as
//! many threads as the caller likes. Each step consumes the previous buffer;
//! when `normalize` returns only the encoded bytes are still allocated. On
//! error nothing is returned, there is no partial output.
//!
//! # Examples
//!
//! ```ignore
//! use graver_core::normalize::{normalize_bytes, NormalizationPolicy};
//!
//! let bytes = std::fs::read("engraving.jpg").unwrap();
//! let thumb = normalize_bytes(&bytes, None, &NormalizationPolicy::thumbnail()).unwrap();
//! std::fs::write("engraving_thumb.jpg", &thumb.bytes).unwrap();
//! ```

mod policy;

pub use policy::{
    NormalizationPolicy, DEFAULT_QUALITY, THUMBNAIL_MAX_HEIGHT, THUMBNAIL_MAX_WIDTH,
};

use thiserror::Error;

use crate::decode::{decode_source, DecodeError, Orientation, SourceImage};
use crate::encode::{encode, EncodeError, EncodedImage, UnsupportedFormatError};
use crate::resize::resize_to_fit;
use crate::transform::{apply_orientation, flatten_alpha};

/// Errors returned by [`normalize`] and [`normalize_bytes`].
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The source is not valid pixel data.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The requested output format is not JPEG or WebP.
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    /// The policy has a zero bounding box or an out-of-range quality.
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// The encoder rejected the final buffer.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Normalize a decoded image: orient, flatten, downscale, encode.
///
/// # Arguments
///
/// * `source` - The decoded image, consumed
/// * `orientation` - EXIF orientation of `source`; `None` applies no rotation
/// * `policy` - Bounding box, output format and quality
///
/// # Errors
///
/// Returns `NormalizeError::InvalidPolicy` before touching the pixels if the
/// policy is unusable, `NormalizeError::Decode` if the buffer does not match
/// its dimensions, and `NormalizeError::Encode` if the encoder fails.
pub fn normalize(
    source: SourceImage,
    orientation: Option<Orientation>,
    policy: &NormalizationPolicy,
) -> Result<EncodedImage, NormalizeError> {
    policy.validate()?;

    let (src_width, src_height) = (source.width, source.height);
    let (width, height) = orientation
        .map_or((src_width, src_height), |o| o.oriented_dimensions(src_width, src_height));
    let image = source.into_dynamic()?;

    let image = apply_orientation(image, orientation);
    tracing::debug!(
        ?orientation,
        src_width,
        src_height,
        width,
        height,
        "Applied orientation"
    );

    let had_alpha = image.color().has_alpha();
    let rgb = flatten_alpha(image, policy.background);
    if had_alpha {
        tracing::debug!(background = ?policy.background.0, "Flattened alpha channel");
    }

    let (oriented_width, oriented_height) = rgb.dimensions();
    let rgb = resize_to_fit(rgb, policy.max_width, policy.max_height);
    tracing::debug!(
        from_width = oriented_width,
        from_height = oriented_height,
        to_width = rgb.width(),
        to_height = rgb.height(),
        max_width = policy.max_width,
        max_height = policy.max_height,
        "Fitted to bounding box"
    );

    let encoded = encode(&rgb, policy.output_format, policy.quality)?;
    tracing::debug!(
        format = %encoded.format,
        quality = policy.quality,
        bytes = encoded.len(),
        "Encoded image"
    );

    Ok(encoded)
}

/// Decode a file and normalize it in one call.
///
/// The orientation comes from the file's EXIF block unless `orientation_override`
/// is given, in which case the file's tag is ignored entirely. Use
/// [`Orientation::from_clockwise_degrees`] to build an override for an image
/// whose tag is missing or wrong.
///
/// # Errors
///
/// Returns `NormalizeError::Decode` if the bytes cannot be decoded, plus the
/// errors of [`normalize`].
pub fn normalize_bytes(
    bytes: &[u8],
    orientation_override: Option<Orientation>,
    policy: &NormalizationPolicy,
) -> Result<EncodedImage, NormalizeError> {
    policy.validate()?;

    let (source, detected) = decode_source(bytes)?;
    if orientation_override.is_some() && orientation_override != detected {
        tracing::debug!(
            ?detected,
            ?orientation_override,
            "Overriding detected orientation"
        );
    }

    normalize(source, orientation_override.or(detected), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;
    use crate::encode::OutputFormat;
    use crate::transform::Background;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ExtendedColorType, ImageEncoder};

    fn rgb_source(width: u32, height: u32) -> SourceImage {
        SourceImage::from_rgb_image(image::RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 90])
        }))
    }

    fn policy(max_width: u32, max_height: u32, format: OutputFormat) -> NormalizationPolicy {
        NormalizationPolicy::new(max_width, max_height, format, 85)
    }

    fn decode(encoded: &EncodedImage) -> image::DynamicImage {
        image::load_from_memory(&encoded.bytes).unwrap()
    }

    #[test]
    fn test_small_image_not_resized() {
        let out = normalize(rgb_source(120, 80), None, &policy(400, 300, OutputFormat::Jpeg)).unwrap();
        assert_eq!((out.width, out.height), (120, 80));
        assert_eq!(out.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_rotation_before_resize() {
        // 60x80 portrait stored sideways: upright it is 80x60, which then fits 40x30 exactly
        let out = normalize(
            rgb_source(60, 80),
            Some(Orientation::Rotate90CW),
            &policy(40, 30, OutputFormat::Jpeg),
        )
        .unwrap();
        assert_eq!((out.width, out.height), (40, 30));
    }

    #[test]
    fn test_rotation_180_keeps_dimensions() {
        let out = normalize(
            rgb_source(50, 20),
            Some(Orientation::Rotate180),
            &policy(400, 300, OutputFormat::WebP),
        )
        .unwrap();
        assert_eq!((out.width, out.height), (50, 20));
    }

    #[test]
    fn test_renormalizing_does_not_rotate_again() {
        let policy = policy(400, 300, OutputFormat::Jpeg);
        let first = normalize(rgb_source(30, 40), Some(Orientation::Rotate90CW), &policy).unwrap();
        assert_eq!((first.width, first.height), (40, 30));

        let (decoded, tag) = decode_source(&first.bytes).unwrap();
        assert_eq!(tag, None, "output must not carry an orientation tag");

        let second = normalize(decoded.clone(), None, &policy).unwrap();
        assert_eq!((second.width, second.height), (40, 30));

        let third = normalize(decoded, Some(Orientation::Normal), &policy).unwrap();
        assert_eq!((third.width, third.height), (40, 30));
    }

    #[test]
    fn test_transparent_region_flattened_to_background() {
        // Left half fully transparent red, right half opaque blue
        let rgba = image::RgbaImage::from_fn(32, 16, |x, _| {
            if x < 16 {
                image::Rgba([255, 0, 0, 0])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        });
        let source = SourceImage::from_rgba_image(rgba);

        let out = normalize(source, None, &policy(400, 300, OutputFormat::Jpeg)).unwrap();
        let rgb = decode(&out).into_rgb8();

        let [r, g, b] = rgb.get_pixel(4, 8).0;
        assert!(r > 240 && g > 240 && b > 240, "expected white, got {:?}", [r, g, b]);
        let [r, _, b] = rgb.get_pixel(28, 8).0;
        assert!(r < 20 && b > 230, "opaque blue should survive");
    }

    #[test]
    fn test_custom_background() {
        let source = SourceImage::new(8, 8, ColorMode::LumaA8, vec![0u8; 8 * 8 * 2]).unwrap();
        let policy = policy(400, 300, OutputFormat::Jpeg).with_background(Background::BLACK);

        let out = normalize(source, None, &policy).unwrap();
        let rgb = decode(&out).into_rgb8();
        assert!(rgb.get_pixel(4, 4).0.iter().all(|&c| c < 10));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut bad = policy(400, 300, OutputFormat::Jpeg);
        bad.quality = 0;
        let result = normalize(rgb_source(10, 10), None, &bad);
        assert!(matches!(result, Err(NormalizeError::InvalidPolicy(_))));

        let bad = policy(0, 300, OutputFormat::WebP);
        let result = normalize(rgb_source(10, 10), None, &bad);
        assert!(matches!(result, Err(NormalizeError::InvalidPolicy(_))));
    }

    #[test]
    fn test_malformed_buffer_is_decode_error() {
        let mut source = rgb_source(10, 10);
        source.pixels.pop();
        let result = normalize(source, None, &policy(400, 300, OutputFormat::Jpeg));
        assert!(matches!(
            result,
            Err(NormalizeError::Decode(DecodeError::InvalidPixelData { .. }))
        ));
    }

    #[test]
    fn test_oversized_webp_is_encode_error() {
        // A 1-pixel-tall strip wider than WebP allows, with a box that keeps it as is
        let source = SourceImage::new(16384, 1, ColorMode::Luma8, vec![0u8; 16384]).unwrap();
        let result = normalize(source, None, &policy(20000, 20000, OutputFormat::WebP));
        assert!(matches!(
            result,
            Err(NormalizeError::Encode(EncodeError::DimensionsTooLarge { .. }))
        ));
    }

    #[test]
    fn test_extreme_aspect_ratio_keeps_one_pixel() {
        let out = normalize(rgb_source(2000, 2), None, &policy(100, 100, OutputFormat::Jpeg)).unwrap();
        assert_eq!((out.width, out.height), (100, 1));
    }

    #[test]
    fn test_deterministic_output() {
        for format in [OutputFormat::Jpeg, OutputFormat::WebP] {
            let policy = policy(50, 50, format);
            let first = normalize(rgb_source(120, 90), Some(Orientation::Rotate270CW), &policy).unwrap();
            let second = normalize(rgb_source(120, 90), Some(Orientation::Rotate270CW), &policy).unwrap();
            assert_eq!(first, second, "{format}");
        }
    }

    #[test]
    fn test_normalize_bytes_uses_override() {
        let pixels = vec![200u8; 40 * 20 * 3];
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, 90)
            .write_image(&pixels, 40, 20, ExtendedColorType::Rgb8)
            .unwrap();

        let policy = policy(400, 300, OutputFormat::WebP);

        let detected = normalize_bytes(&jpeg, None, &policy).unwrap();
        assert_eq!((detected.width, detected.height), (40, 20));

        let fixed = normalize_bytes(&jpeg, Orientation::from_clockwise_degrees(90), &policy).unwrap();
        assert_eq!((fixed.width, fixed.height), (20, 40));
    }

    #[test]
    fn test_normalize_bytes_decode_error() {
        let result = normalize_bytes(b"not an image", None, &NormalizationPolicy::thumbnail());
        assert!(matches!(result, Err(NormalizeError::Decode(_))));
    }

    #[test]
    fn test_unsupported_format_error_converts() {
        let err: NormalizeError = "tiff".parse::<OutputFormat>().unwrap_err().into();
        assert!(matches!(err, NormalizeError::UnsupportedFormat(_)));
        assert_eq!(err.to_string(), "Unsupported output format: tiff");
    }
}
