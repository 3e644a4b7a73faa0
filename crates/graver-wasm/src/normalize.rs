//! Normalization WASM bindings.
//!
//! The policy is passed as a plain object with the same camelCase keys as
//! the core `NormalizationPolicy`. `undefined` or `null` selects the
//! thumbnail preset.
//!
//! # Functions
//!
//! - [`normalize_image`] - Normalize an already decoded `JsSourceImage`
//! - [`normalize_file`] - Decode and normalize file bytes in one call
//! - [`thumbnail_policy`] / [`web_policy`] - The two gallery presets
//!
//! # Example
//!
//! ```typescript
//! import { normalize_file, web_policy } from '@graver/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const webp = normalize_file(bytes, web_policy());
//! const blob = new Blob([webp.bytes()], { type: webp.mime_type });
//!
//! // Manual fix for a plate whose EXIF tag is wrong: rotate 90° clockwise
//! const fixed = normalize_file(bytes, undefined, 90);
//! ```

use crate::types::{JsEncodedImage, JsSourceImage};
use graver_core::{normalize, NormalizationPolicy, Orientation};
use wasm_bindgen::prelude::*;

/// Normalize a decoded image.
///
/// # Arguments
///
/// * `image` - Image from `decode_source` or built from canvas pixels
/// * `policy` - Policy object, or `undefined` for the thumbnail preset
/// * `orientation` - EXIF tag to apply instead of the one stored on `image`;
///   codes outside 1-8 apply no rotation
///
/// # Errors
///
/// Returns an error for an invalid policy, an unsupported output format, a
/// pixel buffer that doesn't match the dimensions, or an encoder failure.
#[wasm_bindgen]
pub fn normalize_image(
    image: &JsSourceImage,
    policy: JsValue,
    orientation: Option<u32>,
) -> Result<JsEncodedImage, JsValue> {
    let policy = policy_from_js(policy)?;
    normalize_source(image, orientation, &policy).map_err(|e| JsValue::from_str(&e))
}

/// Decode file bytes and normalize them.
///
/// # Arguments
///
/// * `bytes` - JPEG, PNG or WebP file contents
/// * `policy` - Policy object, or `undefined` for the thumbnail preset
/// * `rotate_clockwise` - Manual correction in degrees (0, 90, 180, 270);
///   when given, the file's own orientation tag is ignored
#[wasm_bindgen]
pub fn normalize_file(
    bytes: &[u8],
    policy: JsValue,
    rotate_clockwise: Option<u32>,
) -> Result<JsEncodedImage, JsValue> {
    let policy = policy_from_js(policy)?;
    let orientation_override =
        rotation_override(rotate_clockwise).map_err(|e| JsValue::from_str(&e))?;

    normalize::normalize_bytes(bytes, orientation_override, &policy)
        .map(JsEncodedImage::from_encoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The thumbnail preset: 400x300 JPEG at quality 85.
#[wasm_bindgen]
pub fn thumbnail_policy() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&NormalizationPolicy::thumbnail())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The full-size web preset: WebP at quality 85.
#[wasm_bindgen]
pub fn web_policy() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&NormalizationPolicy::web())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn policy_from_js(value: JsValue) -> Result<NormalizationPolicy, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(NormalizationPolicy::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Run the core normalizer on a JS-side image.
///
/// An explicit `orientation` wins over the tag the image was decoded with.
fn normalize_source(
    image: &JsSourceImage,
    orientation: Option<u32>,
    policy: &NormalizationPolicy,
) -> Result<JsEncodedImage, String> {
    let source = image
        .to_source()
        .ok_or_else(|| format!("Unsupported channel count: {}", image.channels()))?;

    let tag = orientation.unwrap_or_else(|| u32::from(image.orientation()));

    normalize::normalize(source, Orientation::from_tag(tag), policy)
        .map(JsEncodedImage::from_encoded)
        .map_err(|e| e.to_string())
}

fn rotation_override(degrees: Option<u32>) -> Result<Option<Orientation>, String> {
    match degrees {
        None => Ok(None),
        Some(degrees) => Orientation::from_clockwise_degrees(degrees)
            .map(Some)
            .ok_or_else(|| format!("Rotation must be a multiple of 90 degrees, got {}", degrees)),
    }
}
