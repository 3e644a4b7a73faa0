//! Core types for source images.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for source decoding and pixel buffer validation.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// Pixel buffer length doesn't match the declared dimensions and mode.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero, or the buffer size does not fit in memory.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Channel layout of a [`SourceImage`] buffer, 8 bits per channel.
///
/// Palette-indexed files are expanded by the decoder, so they arrive here as
/// `Rgb8` or `Rgba8` depending on whether the palette carries transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// Single gray channel.
    Luma8,
    /// Gray plus alpha.
    LumaA8,
    /// Red, green, blue.
    Rgb8,
    /// Red, green, blue, alpha.
    Rgba8,
}

impl ColorMode {
    /// Number of bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Luma8 => 1,
            ColorMode::LumaA8 => 2,
            ColorMode::Rgb8 => 3,
            ColorMode::Rgba8 => 4,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, ColorMode::LumaA8 | ColorMode::Rgba8)
    }

    /// Map a channel count back to a mode (1-4).
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(ColorMode::Luma8),
            2 => Some(ColorMode::LumaA8),
            3 => Some(ColorMode::Rgb8),
            4 => Some(ColorMode::Rgba8),
            _ => None,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
///
/// Each variant names the correction applied to the stored pixels so they
/// display upright. Tag 6 means the camera was turned so the stored image
/// must be rotated 90° clockwise; tag 8 is the opposite 90° turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Parse an EXIF tag value, returning `None` for codes outside 1-8.
    pub fn from_tag(value: u32) -> Option<Self> {
        match value {
            1 => Some(Orientation::Normal),
            2 => Some(Orientation::FlipHorizontal),
            3 => Some(Orientation::Rotate180),
            4 => Some(Orientation::FlipVertical),
            5 => Some(Orientation::Transpose),
            6 => Some(Orientation::Rotate90CW),
            7 => Some(Orientation::Transverse),
            8 => Some(Orientation::Rotate270CW),
            _ => None,
        }
    }

    /// The EXIF tag value for this orientation.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Build the orientation that rotates an image clockwise by `degrees`.
    ///
    /// This is how a manual correction is expressed: instead of trusting the
    /// file's own tag, the caller passes the result of this function as an
    /// override. Only quarter turns (0, 90, 180, 270, or any multiple of 360
    /// added to them) are accepted.
    pub fn from_clockwise_degrees(degrees: u32) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Orientation::Normal),
            90 => Some(Orientation::Rotate90CW),
            180 => Some(Orientation::Rotate180),
            270 => Some(Orientation::Rotate270CW),
            _ => None,
        }
    }

    /// Returns true if this orientation swaps width and height dimensions.
    ///
    /// Rotations of 90° and 270° (and their flip variants Transpose/Transverse)
    /// swap the image dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Get the dimensions an image of `width` x `height` has after correction.
    pub fn oriented_dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// A decoded source image.
///
/// The buffer is owned and moved into `normalize`, which consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub mode: ColorMode,
    /// Pixel data in row-major order, `mode.channels()` bytes per pixel.
    pub pixels: Vec<u8>,
}

impl SourceImage {
    /// Create a new SourceImage, validating the buffer against its dimensions.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidDimensions` if either dimension is zero and
    /// `DecodeError::InvalidPixelData` if the buffer length is wrong.
    pub fn new(
        width: u32,
        height: u32,
        mode: ColorMode,
        pixels: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        let image = Self {
            width,
            height,
            mode,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Create an RGB SourceImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgb8,
            pixels: img.into_raw(),
        }
    }

    /// Create an RGBA SourceImage from an image::RgbaImage.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            mode: ColorMode::Rgba8,
            pixels: img.into_raw(),
        }
    }

    /// Convert any decoded image into the nearest 8-bit layout.
    ///
    /// 16-bit and float images are narrowed to 8 bits; their alpha channel,
    /// if any, is kept.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (mode, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (ColorMode::Luma8, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (ColorMode::LumaA8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (ColorMode::Rgb8, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (ColorMode::Rgba8, buf.into_raw()),
            other if other.color().has_alpha() => (ColorMode::Rgba8, other.into_rgba8().into_raw()),
            other => (ColorMode::Rgb8, other.into_rgb8().into_raw()),
        };
        Self {
            width,
            height,
            mode,
            pixels,
        }
    }

    /// Consume the buffer into an image::DynamicImage for processing.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`SourceImage::new`] if the buffer is invalid.
    pub fn into_dynamic(self) -> Result<DynamicImage, DecodeError> {
        self.validate()?;
        let Self {
            width,
            height,
            mode,
            pixels,
        } = self;

        let image = match mode {
            ColorMode::Luma8 => GrayImage::from_raw(width, height, pixels).map(DynamicImage::from),
            ColorMode::LumaA8 => {
                GrayAlphaImage::from_raw(width, height, pixels).map(DynamicImage::from)
            }
            ColorMode::Rgb8 => RgbImage::from_raw(width, height, pixels).map(DynamicImage::from),
            ColorMode::Rgba8 => RgbaImage::from_raw(width, height, pixels).map(DynamicImage::from),
        };

        image.ok_or_else(|| DecodeError::CorruptedFile("Failed to create image buffer".to_string()))
    }

    fn validate(&self) -> Result<(), DecodeError> {
        let invalid = || DecodeError::InvalidDimensions {
            width: self.width,
            height: self.height,
        };

        if self.width == 0 || self.height == 0 {
            return Err(invalid());
        }

        // usize is 32 bits on wasm32
        let expected = (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(self.mode.channels()))
            .ok_or_else(invalid)?;
        if self.pixels.len() != expected {
            return Err(DecodeError::InvalidPixelData {
                expected,
                actual: self.pixels.len(),
            });
        }

        Ok(())
    }
}
