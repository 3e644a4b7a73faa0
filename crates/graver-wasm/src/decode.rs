//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_source`] - Decode a JPEG, PNG or WebP file without rotating it
//! - [`read_orientation`] - Read only the EXIF orientation tag
//!
//! # Example
//!
//! ```typescript
//! import { decode_source } from '@graver/wasm';
//!
//! const image = decode_source(new Uint8Array(await file.arrayBuffer()));
//! console.log(`${image.width}x${image.height}, orientation tag ${image.orientation}`);
//! ```

use crate::types::JsSourceImage;
use graver_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an image file from bytes.
///
/// The pixels are returned as stored; the EXIF orientation tag is exposed on
/// the result (`orientation`, 0 when absent) and is applied later by
/// `normalize_image`.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the file is corrupted.
#[wasm_bindgen]
pub fn decode_source(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_source(bytes)
        .map(|(image, orientation)| {
            JsSourceImage::from_source(image, orientation.map_or(0, |o| o.tag()))
        })
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Read the EXIF orientation tag (1-8) from file bytes, or 0 if there is none.
#[wasm_bindgen]
pub fn read_orientation(bytes: &[u8]) -> u8 {
    decode::read_orientation(bytes).map_or(0, |o| o.tag())
}
