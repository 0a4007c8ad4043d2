//! In-memory RGB raster used throughout the pipeline.
//!
//! Decoding from a file format is the caller's job; this module only
//! validates that a pixel buffer is consistent with its dimensions.

mod error;

pub use error::ImageError;

use crate::color::Rgb;

/// A row-major 8-bit RGB image.
///
/// Construction guarantees non-zero dimensions and
/// `pixels.len() == width * height`.
///
/// # Example
///
/// ```
/// use stitch_pattern::{Rgb, RgbImage};
///
/// let image = RgbImage::new(2, 1, vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(image.pixel(1, 0), Rgb::new(255, 255, 255));
///
/// assert!(RgbImage::new(2, 2, vec![Rgb::new(0, 0, 0)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// [`ImageError::EmptyImage`] if either dimension is zero,
    /// [`ImageError::BufferSizeMismatch`] if the buffer length is not
    /// `width * height`.
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::EmptyImage { width, height });
        }
        let expected = width
            .checked_mul(height)
            .ok_or(ImageError::EmptyImage { width, height })?;
        if pixels.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a buffer the caller built to size.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Build an image from packed `[R, G, B, R, G, B, ...]` bytes.
    pub fn from_raw(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() % 3 != 0 {
            return Err(ImageError::BufferSizeMismatch {
                expected: width.saturating_mul(height).saturating_mul(3),
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// A `width` x `height` image filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self, ImageError> {
        Self::new(width, height, vec![color; width.saturating_mul(height)])
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }
}
