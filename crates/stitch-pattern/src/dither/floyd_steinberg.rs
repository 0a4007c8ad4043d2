//! Floyd-Steinberg error diffusion.

use crate::color::Rgb;
use crate::image::RgbImage;
use crate::palette::Palette;

use super::ErrorBuffer;

/// Floyd-Steinberg kernel as `(dx, dy, weight)`, divisor 16.
///
/// ```text
///        X   7
///    3   5   1
/// ```
const KERNEL: [(isize, usize, f64); 4] = [(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];
const DIVISOR: f64 = 16.0;

/// Output of [`apply_dithering`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dithered {
    /// Image made only of palette colors
    pub image: RgbImage,
    /// Palette index per pixel, row-major
    pub indices: Vec<u16>,
}

/// Dither `image` onto `palette` with Floyd-Steinberg error diffusion.
///
/// For each pixel in row-major order: add the accumulated error, clamp to
/// 0..=255, pick the nearest palette color (Euclidean RGB, lowest index on
/// ties), and diffuse `clamped - chosen` to the right (7/16), below-left
/// (3/16), below (5/16) and below-right (1/16). Neighbours outside the image
/// receive nothing.
///
/// # Example
///
/// ```
/// use stitch_pattern::{apply_dithering, Palette, Rgb, RgbImage};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let image = RgbImage::filled(8, 8, Rgb::new(128, 128, 128)).unwrap();
///
/// let result = apply_dithering(&image, &palette);
/// let white = result.indices.iter().filter(|&&i| i == 1).count();
/// assert!(white > 16 && white < 48);
/// ```
pub fn apply_dithering(image: &RgbImage, palette: &Palette) -> Dithered {
    let (width, height) = (image.width(), image.height());
    let mut buffer = ErrorBuffer::new(width, 2);
    let mut pixels = Vec::with_capacity(width * height);
    let mut indices = Vec::with_capacity(width * height);

    for row in image.pixels().chunks_exact(width) {
        for (x, &pixel) in row.iter().enumerate() {
            let err = buffer.get_accumulated(x);
            let original = pixel.to_f64();
            let value = [
                (original[0] + err[0]).clamp(0.0, 255.0),
                (original[1] + err[1]).clamp(0.0, 255.0),
                (original[2] + err[2]).clamp(0.0, 255.0),
            ];

            let index = palette.nearest_f64(value);
            let chosen: Rgb = palette.colors()[index];
            let c = chosen.to_f64();
            let quant_error = [value[0] - c[0], value[1] - c[1], value[2] - c[2]];

            for &(dx, dy, weight) in &KERNEL {
                let Some(tx) = x.checked_add_signed(dx) else {
                    continue;
                };
                let share = weight / DIVISOR;
                buffer.add_error(
                    tx,
                    dy,
                    [
                        quant_error[0] * share,
                        quant_error[1] * share,
                        quant_error[2] * share,
                    ],
                );
            }

            pixels.push(chosen);
            indices.push(index as u16);
        }
        buffer.advance_row();
    }

    tracing::debug!(width, height, colors = palette.len(), "Applied Floyd-Steinberg dithering");

    Dithered {
        image: RgbImage::from_parts(width, height, pixels),
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_white() -> Palette {
        Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap()
    }

    #[test]
    fn test_palette_colors_reproduce_exactly() {
        let palette = Palette::new(vec![
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(199, 43, 59),
        ])
        .unwrap();
        let pixels: Vec<Rgb> = (0..30).map(|i| palette.colors()[i % 3]).collect();
        let image = RgbImage::new(6, 5, pixels).unwrap();

        let result = apply_dithering(&image, &palette);
        assert_eq!(result.image, image);
        let expected: Vec<u16> = (0..30).map(|i| (i % 3) as u16).collect();
        assert_eq!(result.indices, expected);
    }

    #[test]
    fn test_output_uses_only_palette_colors() {
        let palette = black_white();
        let pixels = (0..16 * 16).map(|i| {
            let v = (i % 256) as u8;
            Rgb::new(v, 255 - v, v / 2)
        });
        let image = RgbImage::new(16, 16, pixels.collect()).unwrap();

        let result = apply_dithering(&image, &palette);
        assert_eq!(result.indices.len(), 256);
        for (p, &i) in result.image.pixels().iter().zip(&result.indices) {
            assert!((i as usize) < palette.len());
            assert_eq!(*p, palette.colors()[i as usize]);
        }
    }

    #[test]
    fn test_mid_gray_mixes_black_and_white() {
        let image = RgbImage::filled(16, 16, Rgb::new(128, 128, 128)).unwrap();
        let result = apply_dithering(&image, &black_white());
        let white = result.indices.iter().filter(|&&i| i == 1).count();
        // Roughly half of the pixels
        assert!((100..=156).contains(&white), "white count {white}");
    }

    #[test]
    fn test_first_pixel_error_goes_right() {
        // 100 -> black, error +100; next pixel sees 100 + 100 * 7/16 = 143.75 -> white
        let image = RgbImage::filled(2, 1, Rgb::new(100, 100, 100)).unwrap();
        let result = apply_dithering(&image, &black_white());
        assert_eq!(result.indices, vec![0, 1]);
    }
}
