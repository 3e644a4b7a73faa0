//! File decoding with EXIF orientation detection.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, Orientation, SourceImage};

/// Decode an image file from bytes without applying any orientation.
///
/// JPEG, PNG and WebP are supported. The EXIF orientation tag, if present
/// and valid, is returned next to the unrotated pixels.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes
///
/// # Returns
///
/// The decoded `SourceImage` and the orientation tag found in the file.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the file is corrupted.
pub fn decode_source(bytes: &[u8]) -> Result<(SourceImage, Option<Orientation>), DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok((SourceImage::from_dynamic(img), orientation))
}

/// Read the EXIF orientation tag from file bytes.
///
/// Returns `None` if there is no EXIF block, no orientation field, or the
/// value is outside 1-8. A broken EXIF block never fails decoding.
pub fn read_orientation(bytes: &[u8]) -> Option<Orientation> {
    let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif,
        Err(e) => {
            tracing::debug!("No readable EXIF block: {}", e);
            return None;
        }
    };

    let value = exif
        .get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)?;

    let orientation = Orientation::from_tag(value);
    if orientation.is_none() {
        tracing::debug!(value, "Ignoring out-of-range EXIF orientation");
    }
    orientation
}
