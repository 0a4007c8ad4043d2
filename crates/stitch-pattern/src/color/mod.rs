//! Color types and conversion utilities
//!
//! This module provides the two color representations the pipeline works in:
//!
//! - **Rgb**: 8-bit sRGB triples. Used for images, palettes and thread records.
//! - **Lab**: CIELAB (D65, 2° observer). Used for perceptual distance.
//!
//! [`Color`] pairs an [`Rgb`] with the [`Lab`] derived from it, so a Lab value
//! never travels without the RGB it came from.
//!
//! # Example
//!
//! ```
//! use stitch_pattern::{Lab, Rgb};
//!
//! let white = Rgb::new(255, 255, 255);
//! let lab = Lab::from(white);
//! assert!((lab.l - 100.0).abs() < 0.01);
//!
//! // Back to RGB
//! assert_eq!(Rgb::from(lab), white);
//! ```

mod error;
mod lab;
mod rgb;

pub use error::ParseColorError;
pub use lab::{lab_to_rgb, rgb_to_lab, Lab};
pub use rgb::Rgb;

/// An RGB color together with its CIELAB coordinates.
///
/// The Lab value is always computed from the RGB value at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    rgb: Rgb,
    lab: Lab,
}

impl Color {
    /// Create a color, deriving its Lab coordinates.
    #[inline]
    pub fn new(rgb: Rgb) -> Self {
        Self {
            rgb,
            lab: rgb_to_lab(rgb),
        }
    }

    /// The 8-bit RGB value.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The CIELAB value derived from [`rgb()`](Self::rgb).
    #[inline]
    pub fn lab(&self) -> Lab {
        self.lab
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::new(rgb)
    }
}
