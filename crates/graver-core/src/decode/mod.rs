//! Source image decoding for graver.
//!
//! This module provides:
//! - The in-memory [`SourceImage`] the normalizer consumes
//! - EXIF [`Orientation`] codes and their parsing
//! - Decoding of JPEG, PNG and WebP files into a `SourceImage`, with the
//!   orientation tag read separately so the caller can override it
//!
//! # Architecture
//!
//! Decoding and orientation detection are deliberately separate from
//! normalization. `decode_source` never rotates pixels; it hands back the
//! raw buffer and whatever tag it found, and `normalize` decides what to do
//! with both.
//!
//! # Examples
//!
//! ```ignore
//! use graver_core::decode::decode_source;
//!
//! let bytes = std::fs::read("engraving.jpg").unwrap();
//! let (image, orientation) = decode_source(&bytes).unwrap();
//! println!("Decoded {}x{} image ({:?})", image.width, image.height, orientation);
//! ```

mod source;
mod types;

pub use source::{decode_source, read_orientation};
pub use types::{ColorMode, DecodeError, Orientation, SourceImage};
