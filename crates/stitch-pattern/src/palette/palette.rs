//! Palette type and nearest-color lookup.

use crate::color::Rgb;

use super::error::PaletteError;

/// Largest number of colors a palette may hold; grid cells are `u16`.
const MAX_COLORS: usize = u16::MAX as usize + 1;

/// An ordered sequence of unique colors.
///
/// # Example
///
/// ```
/// use stitch_pattern::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.nearest(Rgb::new(200, 200, 200)), 1);
///
/// // Duplicates are rejected
/// assert!(Palette::new(vec![Rgb::new(1, 1, 1), Rgb::new(1, 1, 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from colors in index order.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::DuplicateColor`] if a color repeats
    /// - [`PaletteError::TooManyColors`] beyond 65536 colors
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }
        let mut seen = std::collections::HashSet::with_capacity(colors.len());
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(*color) {
                return Err(PaletteError::DuplicateColor { index });
            }
        }
        Ok(Self { colors })
    }

    /// Wrap colors already known to be unique and within bounds.
    pub(crate) fn from_unique(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty() && colors.len() <= MAX_COLORS);
        Self { colors }
    }

    /// Number of colors.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a validated palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// All colors in index order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index of the nearest color by Euclidean RGB distance.
    ///
    /// Ties go to the lowest index.
    pub fn nearest(&self, color: Rgb) -> usize {
        self.nearest_f64(color.to_f64())
    }

    /// [`nearest`](Self::nearest) for a color with float channels.
    pub fn nearest_f64(&self, color: [f64; 3]) -> usize {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for (i, c) in self.colors.iter().enumerate() {
            let [r, g, b] = c.to_f64();
            let d = (color[0] - r).powi(2) + (color[1] - g).powi(2) + (color[2] - b).powi(2);
            if d < best_dist {
                best_dist = d;
                best = i;
            }
        }
        best
    }
}
