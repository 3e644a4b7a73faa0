//! Alpha flattening for formats encoded without transparency.

use image::{DynamicImage, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Solid colour that transparent pixels are composited onto.
///
/// Serialized as a plain `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Background(pub [u8; 3]);

impl Background {
    pub const WHITE: Background = Background([255, 255, 255]);
    pub const BLACK: Background = Background([0, 0, 0]);
}

impl Default for Background {
    fn default() -> Self {
        Background::WHITE
    }
}

/// Convert any image to 8-bit RGB with no alpha.
///
/// Images without alpha are converted directly (gray is replicated to all
/// three channels). Images with alpha are composited with straight (not
/// premultiplied) alpha:
///
/// ```text
/// out = (c * a + bg * (255 - a) + 127) / 255
/// ```
///
/// so a fully transparent pixel becomes exactly `background` and a fully
/// opaque pixel keeps its colour exactly.
pub fn flatten_alpha(img: DynamicImage, background: Background) -> RgbImage {
    if !img.color().has_alpha() {
        return img.into_rgb8();
    }

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    let Background(bg) = background;

    RgbImage::from_fn(width, height, |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([blend(r, bg[0], a), blend(g, bg[1], a), blend(b, bg[2], a)])
    })
}

#[inline]
fn blend(channel: u8, background: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let mixed = u32::from(channel) * a + u32::from(background) * (255 - a);
    ((mixed + 127) / 255) as u8
}
