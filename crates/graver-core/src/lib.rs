//! Graver Core - orientation-aware image normalization
//!
//! This crate turns scanned or photographed images into web-ready copies:
//! it reads the EXIF orientation, rotates the pixels upright, flattens any
//! transparency, scales down to fit a bounding box and re-encodes as JPEG or
//! lossy WebP.
//!
//! The entry points are [`normalize()`] for an already decoded
//! [`SourceImage`] and [`normalize_bytes`] for a file held in memory. Reading
//! files, naming outputs and writing them back are left to the caller.

pub mod decode;
pub mod encode;
pub mod normalize;
pub mod resize;
pub mod transform;

pub use decode::{decode_source, ColorMode, DecodeError, Orientation, SourceImage};
pub use encode::{EncodeError, EncodedImage, OutputFormat, UnsupportedFormatError};
pub use normalize::{normalize, normalize_bytes, NormalizationPolicy, NormalizeError};
pub use transform::Background;
