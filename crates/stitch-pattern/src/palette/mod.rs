//! Ordered, duplicate-free color palettes.
//!
//! A palette index is the canonical reference to a color everywhere
//! downstream: grid cells store it and symbols are derived from it.

mod error;
#[allow(clippy::module_inception)]
mod palette;

pub use error::PaletteError;
pub use palette::Palette;
