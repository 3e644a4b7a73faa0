//! Bounding-box resizing.
//!
//! Images are only ever scaled down. The scale factor is the largest value
//! `<= 1` that makes both axes fit the box, applied uniformly to both axes.
//!
//! # Rounding
//!
//! The constrained axis lands exactly on the box edge. The other axis is
//! `src * box_edge / src_edge` rounded to the nearest integer, halves rounded
//! up, computed in integer arithmetic so results never depend on float
//! behaviour. Neither axis is ever smaller than 1.

use image::imageops::FilterType;
use image::RgbImage;

/// Lanczos3 avoids the aliasing a nearest or bilinear filter would leave on
/// the fine hatching of engraved plates.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Calculate dimensions that fit within `max_width` x `max_height`.
///
/// Returns the input unchanged when it already fits (no upscaling).
pub fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }
    if width == 0 || height == 0 {
        return (width, height);
    }

    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(max_width), u64::from(max_height));

    if max_w * h <= max_h * w {
        // Width is the tighter constraint
        let new_height = (2 * h * max_w + w) / (2 * w);
        (max_width, new_height.clamp(1, max_h) as u32)
    } else {
        // Height is the tighter constraint
        let new_width = (2 * w * max_h + h) / (2 * h);
        (new_width.clamp(1, max_w) as u32, max_height)
    }
}

/// Resize an image to fit within a bounding box while preserving aspect ratio.
///
/// The image is consumed; if it already fits it is returned as is without
/// copying.
pub fn resize_to_fit(image: RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (src_width, src_height) = image.dimensions();
    let (new_width, new_height) = fit_dimensions(src_width, src_height, max_width, max_height);

    if (new_width, new_height) == (src_width, src_height) {
        return image;
    }

    image::imageops::resize(&image, new_width, new_height, RESAMPLE_FILTER)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
