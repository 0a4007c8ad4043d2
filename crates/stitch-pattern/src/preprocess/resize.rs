//! Area-averaging resize.
//!
//! Each output pixel is the overlap-weighted mean of the source pixels under
//! its footprint (exact box integration). The filter is separable, so weights
//! are computed once per axis and applied in a horizontal then a vertical
//! pass over an `f64` buffer.

use crate::color::Rgb;
use crate::image::RgbImage;

/// `(source index, weight)` pairs for one output sample. Weights sum to 1.
type AxisWeights = Vec<Vec<(usize, f64)>>;

fn axis_weights(src: usize, dst: usize) -> AxisWeights {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|o| {
            let start = o as f64 * scale;
            let end = ((o + 1) as f64 * scale).min(src as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src);
            let span = end - start;
            (first..last)
                .filter_map(|i| {
                    let overlap = end.min((i + 1) as f64) - start.max(i as f64);
                    (overlap > 0.0).then(|| (i, overlap / span))
                })
                .collect()
        })
        .collect()
}

/// `len * num / den` rounded down, computed without overflow.
fn scale_len(len: usize, num: usize, den: usize) -> usize {
    let scaled = len as u128 * num as u128 / den.max(1) as u128;
    usize::try_from(scaled).unwrap_or(usize::MAX)
}

/// Resize to exactly `width` x `height` by area averaging.
///
/// Zero dimensions are raised to 1. Equal dimensions return a copy.
pub fn resize_area_to(image: &RgbImage, width: usize, height: usize) -> RgbImage {
    let width = width.max(1);
    let height = height.max(1);
    if width == image.width() && height == image.height() {
        return image.clone();
    }

    let src_w = image.width();
    let xs = axis_weights(src_w, width);
    let ys = axis_weights(image.height(), height);

    // Horizontal pass: every source row, output columns
    let mut rows = vec![[0.0f64; 3]; width * image.height()];
    for (y, src_row) in image.pixels().chunks_exact(src_w).enumerate() {
        for (x, weights) in xs.iter().enumerate() {
            let acc = &mut rows[y * width + x];
            for &(i, w) in weights {
                let c = src_row[i].to_f64();
                acc[0] += c[0] * w;
                acc[1] += c[1] * w;
                acc[2] += c[2] * w;
            }
        }
    }

    // Vertical pass
    let mut pixels = Vec::with_capacity(width * height);
    for weights in &ys {
        for x in 0..width {
            let mut acc = [0.0f64; 3];
            for &(j, w) in weights {
                let c = rows[j * width + x];
                acc[0] += c[0] * w;
                acc[1] += c[1] * w;
                acc[2] += c[2] * w;
            }
            pixels.push(Rgb::from_f64_rounded(acc));
        }
    }

    tracing::trace!(
        from_width = image.width(),
        from_height = image.height(),
        width,
        height,
        "Area resize"
    );

    RgbImage::from_parts(width, height, pixels)
}

/// Proportional area resize to `target_width`.
///
/// The height is `max(1, floor(height * target_width / width))`.
///
/// # Example
///
/// ```
/// use stitch_pattern::{resize_area, Rgb, RgbImage};
///
/// let image = RgbImage::filled(300, 200, Rgb::new(10, 20, 30)).unwrap();
/// let small = resize_area(&image, 100);
/// assert_eq!((small.width(), small.height()), (100, 66));
/// assert!(small.pixels().iter().all(|&p| p == Rgb::new(10, 20, 30)));
/// ```
pub fn resize_area(image: &RgbImage, target_width: usize) -> RgbImage {
    let target_width = target_width.max(1);
    let height = scale_len(image.height(), target_width, image.width());
    resize_area_to(image, target_width, height.max(1))
}

/// Shrink so the longer side is at most `max_dimension`, keeping the aspect
/// ratio. Images already within the cap are returned unchanged.
pub fn fit_within(image: &RgbImage, max_dimension: usize) -> RgbImage {
    let max_dimension = max_dimension.max(1);
    let (w, h) = (image.width(), image.height());
    if w.max(h) <= max_dimension {
        return image.clone();
    }

    if w >= h {
        resize_area_to(image, max_dimension, scale_len(h, max_dimension, w).max(1))
    } else {
        resize_area_to(image, scale_len(w, max_dimension, h).max(1), max_dimension)
    }
}
