//! Normalization settings.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::NormalizeError;
use crate::encode::{OutputFormat, WEBP_MAX_DIMENSION};
use crate::transform::Background;

/// Quality used by both gallery presets.
pub const DEFAULT_QUALITY: u8 = 85;

/// Width of the gallery thumbnail box.
pub const THUMBNAIL_MAX_WIDTH: u32 = 400;

/// Height of the gallery thumbnail box.
pub const THUMBNAIL_MAX_HEIGHT: u32 = 300;

/// How a source image is turned into an output file.
///
/// Serializes with camelCase keys so the same object can come from JSON or
/// straight from JavaScript:
///
/// ```json
/// { "maxWidth": 400, "maxHeight": 300, "outputFormat": "jpeg", "quality": 85 }
/// ```
///
/// `background` is optional and defaults to white. Deserializing runs
/// [`NormalizationPolicy::validate`], so a negative box or a quality of 300
/// fails with the same "Invalid policy" message as a zero box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "PolicyFields")]
pub struct NormalizationPolicy {
    /// Maximum output width in pixels (must be > 0).
    pub max_width: u32,
    /// Maximum output height in pixels (must be > 0).
    pub max_height: u32,
    /// Encoding of the output.
    pub output_format: OutputFormat,
    /// Encoder quality (1-100).
    pub quality: u8,
    /// Colour transparent pixels are flattened onto.
    #[serde(default)]
    pub background: Background,
}

impl NormalizationPolicy {
    /// Create a policy with the default white background.
    pub fn new(max_width: u32, max_height: u32, output_format: OutputFormat, quality: u8) -> Self {
        Self {
            max_width,
            max_height,
            output_format,
            quality,
            background: Background::default(),
        }
    }

    /// Grid thumbnail: fits 400x300, JPEG at quality 85.
    pub fn thumbnail() -> Self {
        Self::new(
            THUMBNAIL_MAX_WIDTH,
            THUMBNAIL_MAX_HEIGHT,
            OutputFormat::Jpeg,
            DEFAULT_QUALITY,
        )
    }

    /// Full-size web copy: WebP at quality 85.
    ///
    /// The box is the WebP format limit, so only images WebP could not store
    /// at all are scaled down.
    pub fn web() -> Self {
        Self::new(
            WEBP_MAX_DIMENSION,
            WEBP_MAX_DIMENSION,
            OutputFormat::WebP,
            DEFAULT_QUALITY,
        )
    }

    /// Replace the flattening background.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Check that the bounding box and quality are usable.
    ///
    /// # Errors
    ///
    /// Returns `NormalizeError::InvalidPolicy` for a zero bounding box edge
    /// or a quality outside 1-100.
    pub fn validate(&self) -> Result<(), NormalizeError> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(box_error(self.max_width, self.max_height));
        }

        if !(1..=100).contains(&self.quality) {
            return Err(quality_error(self.quality));
        }

        Ok(())
    }
}

fn box_error(width: impl Display, height: impl Display) -> NormalizeError {
    NormalizeError::InvalidPolicy(format!(
        "bounding box must be positive, got {width}x{height}"
    ))
}

fn quality_error(quality: impl Display) -> NormalizeError {
    NormalizeError::InvalidPolicy(format!(
        "quality must be between 1 and 100, got {quality}"
    ))
}

/// Deserialization shape of [`NormalizationPolicy`].
///
/// Integers are read as `i64` so out-of-range numbers reach validation
/// instead of failing as type errors.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyFields {
    max_width: i64,
    max_height: i64,
    output_format: OutputFormat,
    quality: i64,
    #[serde(default)]
    background: Background,
}

impl TryFrom<PolicyFields> for NormalizationPolicy {
    type Error = NormalizeError;

    fn try_from(fields: PolicyFields) -> Result<Self, Self::Error> {
        let PolicyFields {
            max_width,
            max_height,
            output_format,
            quality,
            background,
        } = fields;

        let (Ok(width), Ok(height)) = (u32::try_from(max_width), u32::try_from(max_height)) else {
            return Err(box_error(max_width, max_height));
        };
        let quality = u8::try_from(quality).map_err(|_| quality_error(quality))?;

        let policy = Self::new(width, height, output_format, quality).with_background(background);
        policy.validate()?;
        Ok(policy)
    }
}

impl Default for NormalizationPolicy {
    fn default() -> Self {
        Self::thumbnail()
    }
}
