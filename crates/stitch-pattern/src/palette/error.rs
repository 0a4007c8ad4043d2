//! Error types for palette validation.

use std::fmt;

/// Error type for palette validation.
///
/// Returned when a palette would be empty, contain the same color twice, or
/// hold more colors than a grid cell can index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No colors provided
    EmptyPalette,
    /// Duplicate color found at the specified index
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    /// More colors than `u16` grid cells can address
    TooManyColors {
        /// Number of colors supplied
        count: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => write!(f, "palette must contain at least one color"),
            PaletteError::DuplicateColor { index } => {
                write!(f, "duplicate color at palette index {}", index)
            }
            PaletteError::TooManyColors { count } => {
                write!(f, "palette has {} colors, at most 65536 are supported", count)
            }
        }
    }
}

impl std::error::Error for PaletteError {}
