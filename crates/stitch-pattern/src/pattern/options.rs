//! Conversion parameters.

use serde::{Deserialize, Serialize};

use crate::api::PatternError;
use crate::color::Rgb;
use crate::edge::EdgeOptions;
use crate::matching::Inventory;
use crate::preprocess::{stitch_width, MAX_STITCH_WIDTH};

/// Largest palette a `u16` grid can index.
const MAX_PALETTE: usize = u16::MAX as usize + 1;

/// Kind of pattern to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Full-coverage cross stitch from the quantized image
    #[default]
    CrossStitch,
    /// Two-color backstitch outline from detected edges
    Outline,
}

/// Everything a conversion needs besides the image and catalog.
///
/// # Defaults
///
/// - Cross stitch, at most 50 colors, 14-count Aida
/// - No stitch width (the image is capped at 600 pixels on its longer side)
/// - No contrast enhancement, no dithering
/// - All brands, empty inventory
/// - Edge thresholds 50 / 150, white background with black outline
/// - Seed 42 with 10 clustering restarts
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOptions {
    /// Cross stitch or outline
    pub pattern_type: PatternType,
    /// Upper bound on palette size
    pub max_colors: usize,
    /// Fabric density, stitches per inch
    pub aida_count: u32,
    /// Finished width in centimeters; None keeps the image size (capped)
    pub target_width_cm: Option<f64>,
    /// Apply CLAHE before quantization
    pub enhance_contrast: bool,
    /// Floyd-Steinberg dither onto the reduced palette
    pub dithering: bool,
    /// Only match threads of this brand
    pub brand: Option<String>,
    /// Thread ids the caller owns; matched at a discount
    pub inventory: Inventory,
    /// Outline edge thresholds
    pub edge: EdgeOptions,
    /// Clustering seed
    pub seed: u64,
    /// Clustering restarts
    pub restarts: usize,
    /// Longest side when no width is requested
    pub max_dimension: usize,
    /// Outline background color
    pub background: Rgb,
    /// Outline line color
    pub outline: Rgb,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::CrossStitch,
            max_colors: 50,
            aida_count: 14,
            target_width_cm: None,
            enhance_contrast: false,
            dithering: false,
            brand: None,
            inventory: Inventory::new(),
            edge: EdgeOptions::default(),
            seed: 42,
            restarts: 10,
            max_dimension: crate::preprocess::DEFAULT_MAX_DIMENSION,
            background: Rgb::new(255, 255, 255),
            outline: Rgb::new(0, 0, 0),
        }
    }
}

impl ConversionOptions {
    /// Reject parameter combinations no conversion can honor.
    pub fn validate(&self) -> Result<(), PatternError> {
        let invalid = |msg: String| Err(PatternError::InvalidOptions(msg));

        if self.max_colors == 0 {
            return invalid("max_colors must be at least 1".to_string());
        }
        if self.max_colors > MAX_PALETTE {
            return invalid(format!("max_colors must be at most {MAX_PALETTE}"));
        }
        if self.aida_count == 0 {
            return invalid("aida_count must be at least 1".to_string());
        }
        if let Some(cm) = self.target_width_cm {
            if !cm.is_finite() || cm <= 0.0 {
                return invalid(format!("target width must be a positive length, got {cm} cm"));
            }
            let stitches = stitch_width(self.aida_count, cm);
            if stitches > MAX_STITCH_WIDTH {
                return invalid(format!(
                    "{cm} cm at {}-count is {stitches} stitches, more than {MAX_STITCH_WIDTH}",
                    self.aida_count
                ));
            }
        }
        if self.max_dimension == 0 {
            return invalid("max_dimension must be at least 1".to_string());
        }
        if self.restarts == 0 {
            return invalid("restarts must be at least 1".to_string());
        }
        if self.pattern_type == PatternType::Outline && self.background == self.outline {
            return invalid(format!(
                "outline color {} must differ from background",
                self.outline
            ));
        }
        Ok(())
    }
}
