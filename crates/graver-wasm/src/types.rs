//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core graver
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use graver_core::{ColorMode, EncodedImage, SourceImage};
use wasm_bindgen::prelude::*;

/// A decoded source image wrapper for JavaScript.
///
/// Carries the raw, unrotated pixels and the EXIF orientation tag found in
/// the file (0 when there was none), so the page can show both before
/// normalizing.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out to a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    channels: u8,
    orientation: u8,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - Bytes per pixel: 1 gray, 2 gray+alpha, 3 RGB, 4 RGBA
    /// * `pixels` - Pixel data, row-major order
    ///
    /// Canvas `ImageData` is RGBA, so pixels read from a canvas use 4.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            channels,
            orientation: 0,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes per pixel
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// EXIF orientation tag from the file, 0 if absent
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsSourceImage {
    /// Wrap a core SourceImage and the orientation tag it was decoded with.
    pub(crate) fn from_source(img: SourceImage, orientation: u8) -> Self {
        Self {
            width: img.width,
            height: img.height,
            channels: img.mode.channels() as u8,
            orientation,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core SourceImage, copying the pixel data.
    ///
    /// Returns `None` for an unsupported channel count.
    pub(crate) fn to_source(&self) -> Option<SourceImage> {
        Some(SourceImage {
            width: self.width,
            height: self.height,
            mode: ColorMode::from_channels(self.channels)?,
            pixels: self.pixels.clone(),
        })
    }
}

/// An encoded output file for JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsEncodedImage {
    inner: EncodedImage,
}

#[wasm_bindgen]
impl JsEncodedImage {
    /// Final width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Final height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Format name: "jpeg" or "webp"
    #[wasm_bindgen(getter)]
    pub fn format(&self) -> String {
        self.inner.format.to_string()
    }

    /// MIME type for building a `Blob`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format.mime_type().to_string()
    }

    /// File extension without the dot
    #[wasm_bindgen(getter)]
    pub fn extension(&self) -> String {
        self.inner.format.extension().to_string()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// Percentage saved relative to an original file of `original_len` bytes
    pub fn size_savings(&self, original_len: usize) -> f64 {
        self.inner.size_savings(original_len)
    }

    /// Returns the encoded file as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

impl JsEncodedImage {
    pub(crate) fn from_encoded(inner: EncodedImage) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graver_core::OutputFormat;

    #[test]
    fn test_js_source_image_creation() {
        let img = JsSourceImage::new(100, 50, 4, vec![0u8; 100 * 50 * 4]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 4);
        assert_eq!(img.orientation(), 0);
        assert_eq!(img.byte_length(), 20000);
    }

    #[test]
    fn test_from_source_keeps_orientation() {
        let source = SourceImage::new(2, 1, ColorMode::Rgb8, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let js_img = JsSourceImage::from_source(source, 6);
        assert_eq!(js_img.channels(), 3);
        assert_eq!(js_img.orientation(), 6);
        assert_eq!(js_img.pixels(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_to_source() {
        let js_img = JsSourceImage::new(50, 25, 2, vec![128u8; 50 * 25 * 2]);
        let source = js_img.to_source().unwrap();
        assert_eq!(source.mode, ColorMode::LumaA8);
        assert_eq!((source.width, source.height), (50, 25));
    }

    #[test]
    fn test_to_source_rejects_bad_channel_count() {
        let js_img = JsSourceImage::new(1, 1, 5, vec![0u8; 5]);
        assert!(js_img.to_source().is_none());
    }

    #[test]
    fn test_js_encoded_image_accessors() {
        let encoded = JsEncodedImage::from_encoded(EncodedImage {
            bytes: vec![1, 2, 3, 4],
            format: OutputFormat::WebP,
            width: 8,
            height: 6,
        });
        assert_eq!(encoded.width(), 8);
        assert_eq!(encoded.height(), 6);
        assert_eq!(encoded.format(), "webp");
        assert_eq!(encoded.mime_type(), "image/webp");
        assert_eq!(encoded.extension(), "webp");
        assert_eq!(encoded.byte_length(), 4);
        assert_eq!(encoded.bytes(), vec![1, 2, 3, 4]);
        assert!((encoded.size_savings(8) - 50.0).abs() < f64::EPSILON);
    }
}
