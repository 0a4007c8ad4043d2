//! Stitch-grid sizing.
//!
//! Aida fabric is sold by stitches per inch; patterns are planned in
//! centimeters. One output pixel becomes one stitch.

use crate::image::RgbImage;

use super::resize::resize_area;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Widest stitch grid a conversion accepts. 10 000 stitches is over 7 m of
/// 14-count Aida.
pub const MAX_STITCH_WIDTH: usize = 10_000;

/// Number of stitches across `width_cm` of fabric at `density` stitches per
/// inch, rounded to nearest and at least 1.
///
/// # Example
///
/// ```
/// use stitch_pattern::stitch_width;
///
/// // 14-count Aida, 10 cm wide: 10 * 14 / 2.54 = 55.1
/// assert_eq!(stitch_width(14, 10.0), 55);
/// ```
pub fn stitch_width(density: u32, width_cm: f64) -> usize {
    let stitches_per_cm = density as f64 / CM_PER_INCH;
    let stitches = (width_cm * stitches_per_cm).round();
    if stitches.is_finite() && stitches >= 1.0 {
        stitches as usize
    } else {
        1
    }
}

/// Resize `image` so each pixel is one stitch of a `width_cm` wide piece.
pub fn pixelize(image: &RgbImage, density: u32, width_cm: f64) -> RgbImage {
    resize_area(image, stitch_width(density, width_cm))
}
