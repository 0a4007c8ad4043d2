//! Contrast limited adaptive histogram equalization on L*.
//!
//! Only lightness is equalized. Each pixel's a*/b* pass through untouched and
//! the result is re-encoded to sRGB, so hues are preserved.

use crate::color::{lab_to_rgb, rgb_to_lab, Lab};
use crate::image::RgbImage;

use super::options::ClaheOptions;

const BINS: usize = 256;

/// Equalization map of one tile: input L* bin -> output bin (as float).
type TileMap = [f64; BINS];

#[inline]
fn l_to_bin(l: f64) -> usize {
    (l * 255.0 / 100.0).round().clamp(0.0, 255.0) as usize
}

/// Tile boundaries along one axis: `count + 1` offsets from 0 to `len`.
fn tile_bounds(len: usize, count: usize) -> Vec<usize> {
    (0..=count).map(|t| t * len / count).collect()
}

fn tile_map(
    bins: &[usize],
    width: usize,
    xs: (usize, usize),
    ys: (usize, usize),
    clip_limit: f64,
) -> TileMap {
    let mut hist = [0.0f64; BINS];
    for y in ys.0..ys.1 {
        for &bin in &bins[y * width + xs.0..y * width + xs.1] {
            hist[bin] += 1.0;
        }
    }

    let pixels = ((xs.1 - xs.0) * (ys.1 - ys.0)) as f64;
    let clip = (clip_limit * pixels / BINS as f64).max(1.0);

    let mut excess = 0.0;
    for h in hist.iter_mut() {
        if *h > clip {
            excess += *h - clip;
            *h = clip;
        }
    }
    let redistributed = excess / BINS as f64;

    let mut map = [0.0f64; BINS];
    let mut cdf = 0.0;
    for (m, h) in map.iter_mut().zip(hist.iter()) {
        cdf += h + redistributed;
        *m = (cdf * 255.0 / pixels).min(255.0);
    }
    map
}

/// Interpolation coordinates along one axis for pixel `p`.
///
/// Returns the two neighbouring tile indices and the weight of the second.
#[inline]
fn neighbours(p: usize, tile_size: f64, tiles: usize) -> (usize, usize, f64) {
    let f = (p as f64 + 0.5) / tile_size - 0.5;
    let lo = f.floor();
    let weight = f - lo;
    let last = (tiles - 1) as f64;
    let t0 = lo.clamp(0.0, last) as usize;
    let t1 = (lo + 1.0).clamp(0.0, last) as usize;
    (t0, t1, weight)
}

/// Apply CLAHE to the lightness channel of `image`.
///
/// The image is split into a tile grid (reduced when the image has fewer
/// pixels than tiles along an axis). Each tile's L* histogram is clipped at
/// `clip_limit * tile_pixels / 256` with the excess spread evenly over all
/// bins, then turned into an equalization map. Each pixel's new L* blends the
/// maps of the four nearest tile centers bilinearly.
///
/// # Example
///
/// ```
/// use stitch_pattern::{enhance_contrast, ClaheOptions, Rgb, RgbImage};
///
/// let image = RgbImage::filled(32, 16, Rgb::new(120, 60, 30)).unwrap();
/// let enhanced = enhance_contrast(&image, &ClaheOptions::new());
/// assert_eq!((enhanced.width(), enhanced.height()), (32, 16));
/// ```
pub fn enhance_contrast(image: &RgbImage, options: &ClaheOptions) -> RgbImage {
    let (width, height) = (image.width(), image.height());
    let tiles_x = options.tiles_x.clamp(1, width);
    let tiles_y = options.tiles_y.clamp(1, height);

    let labs: Vec<Lab> = image.pixels().iter().map(|&p| rgb_to_lab(p)).collect();
    let bins: Vec<usize> = labs.iter().map(|lab| l_to_bin(lab.l)).collect();

    let bx = tile_bounds(width, tiles_x);
    let by = tile_bounds(height, tiles_y);

    let mut maps = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            maps.push(tile_map(
                &bins,
                width,
                (bx[tx], bx[tx + 1]),
                (by[ty], by[ty + 1]),
                options.clip_limit,
            ));
        }
    }

    let tile_w = width as f64 / tiles_x as f64;
    let tile_h = height as f64 / tiles_y as f64;
    let columns: Vec<_> = (0..width).map(|x| neighbours(x, tile_w, tiles_x)).collect();

    let mut pixels = Vec::with_capacity(width * height);
    for y in 0..height {
        let (y0, y1, ay) = neighbours(y, tile_h, tiles_y);
        for (x, &(x0, x1, ax)) in columns.iter().enumerate() {
            let i = y * width + x;
            let bin = bins[i];

            let lerp_row = |row: usize| {
                maps[row * tiles_x + x0][bin] * (1.0 - ax) + maps[row * tiles_x + x1][bin] * ax
            };
            let top = lerp_row(y0);
            let bottom = lerp_row(y1);
            let value = top * (1.0 - ay) + bottom * ay;

            let lab = labs[i];
            pixels.push(lab_to_rgb(Lab::new(value * 100.0 / 255.0, lab.a, lab.b)));
        }
    }

    tracing::debug!(
        width,
        height,
        tiles_x,
        tiles_y,
        clip_limit = options.clip_limit,
        "Applied CLAHE"
    );

    RgbImage::from_parts(width, height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn l_range(image: &RgbImage) -> (f64, f64) {
        image
            .pixels()
            .iter()
            .map(|&p| rgb_to_lab(p).l)
            .fold((f64::MAX, f64::MIN), |(lo, hi), l| (lo.min(l), hi.max(l)))
    }

    #[test]
    fn test_uniform_image_stays_uniform() {
        let image = RgbImage::filled(64, 64, Rgb::new(128, 128, 128)).unwrap();
        let out = enhance_contrast(&image, &ClaheOptions::new());

        let first = out.pixel(0, 0);
        assert!(out.pixels().iter().all(|&p| p == first));

        let before = rgb_to_lab(Rgb::new(128, 128, 128)).l;
        let after = rgb_to_lab(first).l;
        assert!((before - after).abs() < 3.0, "L* {before} -> {after}");
    }

    #[test]
    fn test_gray_stays_gray() {
        let pixels = (0..48 * 48)
            .map(|i| {
                let v = ((i % 48) * 3 + (i / 48)) as u8;
                Rgb::new(v, v, v)
            })
            .collect();
        let image = RgbImage::new(48, 48, pixels).unwrap();
        let out = enhance_contrast(&image, &ClaheOptions::new());

        assert_eq!((out.width(), out.height()), (48, 48));
        for &p in out.pixels() {
            let lab = rgb_to_lab(p);
            assert!(lab.a.abs() < 1.0 && lab.b.abs() < 1.0, "{p} is not gray");
        }
    }

    #[test]
    fn test_low_contrast_gradient_is_stretched() {
        let pixels = (0..64 * 64)
            .map(|i| {
                let v = 100 + ((i % 64) / 2) as u8;
                Rgb::new(v, v, v)
            })
            .collect();
        let image = RgbImage::new(64, 64, pixels).unwrap();
        let out = enhance_contrast(&image, &ClaheOptions::new());

        let (lo_in, hi_in) = l_range(&image);
        let (lo_out, hi_out) = l_range(&out);
        assert!(
            hi_out - lo_out > hi_in - lo_in,
            "range {lo_in}..{hi_in} became {lo_out}..{hi_out}"
        );
    }

    #[test]
    fn test_tiny_image_reduces_grid() {
        let image = RgbImage::from_raw(2, 1, &[10, 10, 10, 240, 240, 240]).unwrap();
        let out = enhance_contrast(&image, &ClaheOptions::new());
        assert_eq!((out.width(), out.height()), (2, 1));

        let image = RgbImage::filled(1, 1, Rgb::new(200, 10, 10)).unwrap();
        let out = enhance_contrast(&image, &ClaheOptions::new().tile_grid(16, 16));
        assert_eq!((out.width(), out.height()), (1, 1));
    }

    #[test]
    fn test_tile_bounds_cover_axis() {
        assert_eq!(tile_bounds(10, 3), vec![0, 3, 6, 10]);
    }
}
