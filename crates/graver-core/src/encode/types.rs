//! Output formats and encoded results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or the buffer size overflows usize
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Width or height exceeds what the format can store
    #[error("{format} cannot store {width}x{height}: limit is {limit} pixels per side")]
    DimensionsTooLarge {
        format: OutputFormat,
        width: u32,
        height: u32,
        limit: u32,
    },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: OutputFormat, message: String },
}

/// A requested output format outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported output format: {0}")]
pub struct UnsupportedFormatError(pub String);

/// Lossy output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::WebP => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => f.write_str("jpeg"),
            OutputFormat::WebP => f.write_str("webp"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = UnsupportedFormatError;

    /// Accepts format names, extensions and MIME types, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" | "image/jpeg" => Ok(OutputFormat::Jpeg),
            "webp" | "image/webp" => Ok(OutputFormat::WebP),
            _ => Err(UnsupportedFormatError(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = UnsupportedFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.to_string()
    }
}

/// An encoded image ready to be written out by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Complete encoded file contents.
    pub bytes: Vec<u8>,
    /// Format of `bytes`.
    pub format: OutputFormat,
    /// Final pixel width.
    pub width: u32,
    /// Final pixel height.
    pub height: u32,
}

impl EncodedImage {
    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Percentage saved relative to an original file of `original_len` bytes.
    ///
    /// Negative when the encoded image is larger than the original. Returns
    /// 0.0 for an empty original.
    pub fn size_savings(&self, original_len: usize) -> f64 {
        if original_len == 0 {
            return 0.0;
        }
        let original = original_len as f64;
        (original - self.bytes.len() as f64) / original * 100.0
    }
}

/// Check an RGB8 buffer against its dimensions before handing it to an encoder.
pub(super) fn check_rgb_buffer(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(EncodeError::InvalidDimensions { width, height })?;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }

    Ok(())
}
