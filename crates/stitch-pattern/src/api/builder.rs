//! PatternConverter builder -- the primary ergonomic entry point for the crate.
//!
//! [`PatternConverter`] wraps [`assemble_pattern`](crate::assemble_pattern)
//! with fluent configuration over a borrowed [`ThreadCatalog`].

use crate::catalog::ThreadCatalog;
use crate::color::Rgb;
use crate::edge::EdgeOptions;
use crate::image::RgbImage;
use crate::matching::Inventory;
use crate::pattern::{assemble_pattern, ConversionOptions, Pattern, PatternType};

use super::budget::ConversionBudget;
use super::error::PatternError;

/// High-level conversion builder.
///
/// # Design
///
/// - Constructor requires the [`ThreadCatalog`] every match is made against
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter serves many
///   images
///
/// # Example
///
/// ```
/// use stitch_pattern::{PatternConverter, Rgb, RgbImage, Thread, ThreadCatalog};
///
/// let catalog = ThreadCatalog::new(vec![
///     Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
///     Thread::new("dmc_321", "DMC", "321", "Red", Rgb::new(199, 43, 59)),
/// ])
/// .unwrap();
///
/// let converter = PatternConverter::new(&catalog).max_colors(4).brand("DMC");
///
/// let image = RgbImage::filled(4, 2, Rgb::new(200, 40, 60)).unwrap();
/// let pattern = converter.convert(&image).unwrap();
///
/// assert_eq!(pattern.palette.len(), 1);
/// assert_eq!(pattern.palette[0].thread.code, "321");
/// ```
#[derive(Debug, Clone)]
pub struct PatternConverter<'a> {
    catalog: &'a ThreadCatalog,
    options: ConversionOptions,
    budget: ConversionBudget,
}

impl<'a> PatternConverter<'a> {
    /// Create a converter with default options.
    pub fn new(catalog: &'a ThreadCatalog) -> Self {
        Self {
            catalog,
            options: ConversionOptions::default(),
            budget: ConversionBudget::unlimited(),
        }
    }

    /// Replace all options at once.
    #[inline]
    pub fn options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Cross stitch or outline.
    #[inline]
    pub fn pattern_type(mut self, pattern_type: PatternType) -> Self {
        self.options.pattern_type = pattern_type;
        self
    }

    /// Upper bound on palette size.
    #[inline]
    pub fn max_colors(mut self, max_colors: usize) -> Self {
        self.options.max_colors = max_colors;
        self
    }

    /// Fabric density in stitches per inch.
    #[inline]
    pub fn aida_count(mut self, aida_count: u32) -> Self {
        self.options.aida_count = aida_count;
        self
    }

    /// Finished width in centimeters.
    #[inline]
    pub fn target_width_cm(mut self, width_cm: f64) -> Self {
        self.options.target_width_cm = Some(width_cm);
        self
    }

    /// Enable CLAHE contrast enhancement.
    #[inline]
    pub fn enhance_contrast(mut self, enabled: bool) -> Self {
        self.options.enhance_contrast = enabled;
        self
    }

    /// Enable Floyd-Steinberg dithering.
    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.options.dithering = enabled;
        self
    }

    /// Restrict matching to one brand.
    #[inline]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.options.brand = Some(brand.into());
        self
    }

    /// Thread ids the caller owns.
    #[inline]
    pub fn inventory(mut self, inventory: Inventory) -> Self {
        self.options.inventory = inventory;
        self
    }

    /// Outline edge thresholds.
    #[inline]
    pub fn edge_thresholds(mut self, low: f64, high: f64) -> Self {
        self.options.edge = EdgeOptions::new(low, high);
        self
    }

    /// Clustering seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.options.seed = seed;
        self
    }

    /// Clustering restarts.
    #[inline]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.options.restarts = restarts;
        self
    }

    /// Longest side when no width is requested.
    #[inline]
    pub fn max_dimension(mut self, max_dimension: usize) -> Self {
        self.options.max_dimension = max_dimension;
        self
    }

    /// Outline background and line colors.
    #[inline]
    pub fn outline_colors(mut self, background: Rgb, outline: Rgb) -> Self {
        self.options.background = background;
        self.options.outline = outline;
        self
    }

    /// Deadline and cancellation.
    #[inline]
    pub fn budget(mut self, budget: ConversionBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Current options.
    pub fn conversion_options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert an image into a pattern.
    ///
    /// The converter is reusable -- `convert()` takes `&self`.
    pub fn convert(&self, image: &RgbImage) -> Result<Pattern, PatternError> {
        assemble_pattern(image, self.catalog, &self.options, &self.budget)
    }

    /// Convert packed `[R, G, B, ...]` bytes.
    pub fn convert_raw(
        &self,
        width: usize,
        height: usize,
        bytes: &[u8],
    ) -> Result<Pattern, PatternError> {
        let image = RgbImage::from_raw(width, height, bytes)?;
        self.convert(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Thread;

    fn catalog() -> ThreadCatalog {
        ThreadCatalog::new(vec![
            Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
            Thread::new("dmc_blanc", "DMC", "BLANC", "White", Rgb::new(255, 255, 255)),
        ])
        .unwrap()
    }

    #[test]
    fn test_builder_sets_options() {
        let catalog = catalog();
        let converter = PatternConverter::new(&catalog)
            .max_colors(7)
            .aida_count(18)
            .target_width_cm(12.5)
            .dithering(true)
            .edge_thresholds(200.0, 100.0)
            .seed(9);
        let options = converter.conversion_options();
        assert_eq!(options.max_colors, 7);
        assert_eq!(options.aida_count, 18);
        assert_eq!(options.target_width_cm, Some(12.5));
        assert!(options.dithering);
        assert_eq!(options.edge.low_threshold, 100.0);
        assert_eq!(options.seed, 9);
    }

    #[test]
    fn test_converter_is_reusable() {
        let catalog = catalog();
        let converter = PatternConverter::new(&catalog).max_colors(2);
        let a = RgbImage::filled(3, 3, Rgb::new(10, 10, 10)).unwrap();
        let b = RgbImage::filled(5, 2, Rgb::new(240, 240, 240)).unwrap();

        assert_eq!(converter.convert(&a).unwrap().palette[0].thread.id, "dmc_310");
        assert_eq!(converter.convert(&b).unwrap().palette[0].thread.id, "dmc_blanc");
    }

    #[test]
    fn test_convert_raw_rejects_bad_buffer() {
        let catalog = catalog();
        let err = PatternConverter::new(&catalog)
            .convert_raw(2, 2, &[0, 0, 0])
            .unwrap_err();
        assert!(matches!(err, PatternError::Image(_)));
    }
}
