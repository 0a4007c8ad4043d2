//! stitch-pattern: turn raster images into embroidery patterns
//!
//! This library reduces an image to a small palette of colors, lays it out on
//! a stitch grid sized for a given fabric, and matches every palette color to
//! the perceptually closest thread in a multi-brand catalog.
//!
//! # Quick Start
//!
//! The [`PatternConverter`] builder is the primary entry point:
//!
//! ```
//! use stitch_pattern::{PatternConverter, Rgb, RgbImage, Thread, ThreadCatalog};
//!
//! let catalog = ThreadCatalog::new(vec![
//!     Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
//!     Thread::new("dmc_blanc", "DMC", "BLANC", "White", Rgb::new(255, 255, 255)),
//! ])
//! .unwrap();
//!
//! let image = RgbImage::filled(40, 20, Rgb::new(20, 20, 20)).unwrap();
//! let pattern = PatternConverter::new(&catalog)
//!     .max_colors(8)
//!     .aida_count(14)
//!     .target_width_cm(5.0)
//!     .convert(&image)
//!     .unwrap();
//!
//! assert_eq!(pattern.grid.width(), 28);
//! assert_eq!(pattern.palette[0].thread.code, "310");
//! ```
//!
//! # Color Spaces
//!
//! - [`Rgb`]: 8-bit sRGB, used for images, palettes, clustering and dithering
//! - [`Lab`]: CIELAB (D65), used only for thread matching
//!
//! Clustering and error diffusion stay in RGB: they operate on the image the
//! stitcher will see, and their output must be exact 8-bit colors. Thread
//! matching uses CIE76 Delta E in Lab, where distance tracks perceived
//! difference well enough to rank a few hundred thread colors.
//!
//! # Pipeline Overview
//!
//! ```text
//! RgbImage                (decoded by the caller)
//!     |
//!     v
//! [Resize]                 area averaging to the stitch grid
//!     |                    (width from Aida count and cm, or max_dimension cap)
//!     v
//! [CLAHE]                  optional, on L* only
//!     |
//!     +--------------------------------+
//!     | cross stitch                   | outline
//!     v                                v
//! [k-means]                        [Canny]
//!     |  palette + labels              |  edge mask
//!     v                                v
//! [Floyd-Steinberg]  (optional)    palette = [background, line]
//!     |                                |
//!     +--------------------------------+
//!     |
//!     v
//! [Thread matching]        nearest Delta E per palette color,
//!     |                    brand filter, inventory discount
//!     v
//! Pattern                  grid, palette entries + symbols,
//!                          dimensions, time estimate
//! ```
//!
//! The catalog is read-only and shared; everything else lives for one
//! conversion. A [`ConversionBudget`] can cancel or time out a conversion
//! between stages.

pub mod api;
pub mod catalog;
pub mod color;
pub mod dither;
pub mod edge;
pub mod image;
pub mod matching;
pub mod palette;
pub mod pattern;
pub mod preprocess;
pub mod quantize;

#[cfg(test)]
mod domain_tests;

pub use api::{ConversionBudget, PatternConverter, PatternError, Stage};
pub use catalog::{CatalogError, Thread, ThreadCatalog, ThreadRecord};
pub use color::{lab_to_rgb, rgb_to_lab, Color, Lab, ParseColorError, Rgb};
pub use dither::{apply_dithering, Dithered};
pub use edge::{detect_edges, EdgeMask, EdgeOptions};
pub use image::{ImageError, RgbImage};
pub use matching::{
    convert_brand, delta_e, find_closest_thread, Inventory, MatchError, MatchQuality, MatchResult,
    INVENTORY_DISCOUNT,
};
pub use palette::{Palette, PaletteError};
pub use pattern::{
    assemble_pattern, symbol_for_index, ConversionOptions, Dimensions, Grid, PaletteEntry, Pattern,
    PatternType, ThreadRef,
};
pub use preprocess::{
    enhance_contrast, fit_within, pixelize, resize_area, resize_area_to, stitch_width,
    ClaheOptions, PreprocessOptions, Preprocessor, CM_PER_INCH, DEFAULT_MAX_DIMENSION,
    MAX_STITCH_WIDTH,
};
pub use quantize::{reduce_colors, QuantizeOptions, Quantized};
