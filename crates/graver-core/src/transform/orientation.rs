//! EXIF orientation correction.
//!
//! Mapping from tag to pixel operation (standard EXIF table):
//!
//! ```text
//! tag  stored image looks like     correction
//!  1   upright                     none
//!  2   mirrored                    flip horizontal
//!  3   upside down                 rotate 180
//!  4   mirrored upside down        flip vertical
//!  5   mirrored, on its side       rotate 90 CW, then flip horizontal
//!  6   turned 90 CCW               rotate 90 CW
//!  7   mirrored, on its side       rotate 270 CW, then flip horizontal
//!  8   turned 90 CW                rotate 270 CW (90 CCW)
//! ```
//!
//! Rotations are lossless quarter turns that expand the canvas, so no pixel
//! is cropped.

use image::DynamicImage;

use crate::decode::Orientation;

/// Apply an orientation correction to an image.
///
/// `None` leaves the image untouched. Passing `Some(Orientation::Normal)` is
/// equivalent, so normalizing an already upright image is idempotent.
pub fn apply_orientation(img: DynamicImage, orientation: Option<Orientation>) -> DynamicImage {
    let Some(orientation) = orientation else {
        return img;
    };

    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    const RED: [u8; 3] = [255, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];
    const BLUE: [u8; 3] = [0, 0, 255];
    const YELLOW: [u8; 3] = [255, 255, 0];

    /// 3x2 image with distinct corner colours:
    ///
    /// ```text
    /// R . G
    /// B . Y
    /// ```
    fn corners() -> DynamicImage {
        let mut img = RgbImage::from_pixel(3, 2, image::Rgb([0, 0, 0]));
        img.put_pixel(0, 0, image::Rgb(RED));
        img.put_pixel(2, 0, image::Rgb(GREEN));
        img.put_pixel(0, 1, image::Rgb(BLUE));
        img.put_pixel(2, 1, image::Rgb(YELLOW));
        DynamicImage::ImageRgb8(img)
    }

    /// Corner colours after correction, clockwise from top-left.
    fn corner_colours(img: DynamicImage) -> [[u8; 3]; 4] {
        let rgb = img.into_rgb8();
        let (w, h) = rgb.dimensions();
        [
            rgb.get_pixel(0, 0).0,
            rgb.get_pixel(w - 1, 0).0,
            rgb.get_pixel(w - 1, h - 1).0,
            rgb.get_pixel(0, h - 1).0,
        ]
    }

    #[test]
    fn test_none_is_noop() {
        let result = apply_orientation(corners(), None);
        assert_eq!((result.width(), result.height()), (3, 2));
        assert_eq!(corner_colours(result), [RED, GREEN, YELLOW, BLUE]);
    }

    #[test]
    fn test_normal_is_noop() {
        let result = apply_orientation(corners(), Some(Orientation::Normal));
        assert_eq!(corner_colours(result), [RED, GREEN, YELLOW, BLUE]);
    }

    #[test]
    fn test_rotate180() {
        let result = apply_orientation(corners(), Some(Orientation::Rotate180));
        assert_eq!((result.width(), result.height()), (3, 2));
        assert_eq!(corner_colours(result), [YELLOW, BLUE, RED, GREEN]);
    }

    #[test]
    fn test_rotate90_cw_moves_left_edge_to_top() {
        // Tag 6: the stored left column (R over B) becomes the top row, read
        // right to left, so B ends up top-left and R top-right.
        let result = apply_orientation(corners(), Some(Orientation::Rotate90CW));
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(corner_colours(result), [BLUE, RED, GREEN, YELLOW]);
    }

    #[test]
    fn test_rotate270_cw_moves_right_edge_to_top() {
        // Tag 8: the stored right column (G over Y) becomes the top row
        let result = apply_orientation(corners(), Some(Orientation::Rotate270CW));
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(corner_colours(result), [GREEN, YELLOW, BLUE, RED]);
    }

    #[test]
    fn test_tags_6_and_8_are_inverse() {
        let once = apply_orientation(corners(), Some(Orientation::Rotate90CW));
        let back = apply_orientation(once, Some(Orientation::Rotate270CW));
        assert_eq!(corner_colours(back), [RED, GREEN, YELLOW, BLUE]);
    }

    #[test]
    fn test_flip_horizontal() {
        let result = apply_orientation(corners(), Some(Orientation::FlipHorizontal));
        assert_eq!(corner_colours(result), [GREEN, RED, BLUE, YELLOW]);
    }

    #[test]
    fn test_flip_vertical() {
        let result = apply_orientation(corners(), Some(Orientation::FlipVertical));
        assert_eq!(corner_colours(result), [BLUE, YELLOW, GREEN, RED]);
    }

    #[test]
    fn test_transpose_mirrors_main_diagonal() {
        // (x, y) -> (y, x)
        let result = apply_orientation(corners(), Some(Orientation::Transpose));
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(corner_colours(result), [RED, BLUE, YELLOW, GREEN]);
    }

    #[test]
    fn test_transverse_mirrors_anti_diagonal() {
        // (x, y) -> (H - 1 - y, W - 1 - x)
        let result = apply_orientation(corners(), Some(Orientation::Transverse));
        assert_eq!((result.width(), result.height()), (2, 3));
        assert_eq!(corner_colours(result), [YELLOW, GREEN, RED, BLUE]);
    }

    #[test]
    fn test_output_matches_oriented_dimensions() {
        for tag in 1..=8u32 {
            let orientation = Orientation::from_tag(tag).unwrap();
            let result = apply_orientation(corners(), Some(orientation));
            assert_eq!(
                (result.width(), result.height()),
                orientation.oriented_dimensions(3, 2),
                "tag {tag}"
            );
        }
    }
}
