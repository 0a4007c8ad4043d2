//! Preprocessing options and configuration.

/// Longest side, in pixels, an image keeps when no stitch width is requested.
pub const DEFAULT_MAX_DIMENSION: usize = 600;

/// CLAHE (contrast limited adaptive histogram equalization) settings.
///
/// # Example
///
/// ```
/// use stitch_pattern::ClaheOptions;
///
/// let options = ClaheOptions::new().clip_limit(2.0).tile_grid(4, 4);
/// assert_eq!(options.tiles_x, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheOptions {
    /// Histogram clip limit, relative to a flat histogram.
    ///
    /// - 1.0 = no equalization beyond a flat histogram
    /// - 3.0 = default
    pub clip_limit: f64,

    /// Number of tile columns.
    pub tiles_x: usize,

    /// Number of tile rows.
    pub tiles_y: usize,
}

impl Default for ClaheOptions {
    fn default() -> Self {
        Self {
            clip_limit: 3.0,
            tiles_x: 8,
            tiles_y: 8,
        }
    }
}

impl ClaheOptions {
    /// Default settings: clip limit 3.0 on an 8x8 tile grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clip limit. Values below 1.0 are raised to 1.0.
    #[must_use]
    pub fn clip_limit(mut self, clip_limit: f64) -> Self {
        self.clip_limit = clip_limit.max(1.0);
        self
    }

    /// Set the tile grid. Zero is raised to one tile.
    #[must_use]
    pub fn tile_grid(mut self, tiles_x: usize, tiles_y: usize) -> Self {
        self.tiles_x = tiles_x.max(1);
        self.tiles_y = tiles_y.max(1);
        self
    }
}

/// Configuration for the [`Preprocessor`](super::Preprocessor).
///
/// # Defaults
///
/// - Stitch width: none (keep the image size, subject to the cap)
/// - Max dimension: 600 pixels
/// - Contrast enhancement: disabled
///
/// # Example
///
/// ```
/// use stitch_pattern::{ClaheOptions, PreprocessOptions};
///
/// let options = PreprocessOptions::new()
///     .stitch_width(140)
///     .enhance_contrast(ClaheOptions::new());
/// assert_eq!(options.stitch_width, Some(140));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PreprocessOptions {
    /// Target width in stitches (None = keep size, apply the cap).
    pub stitch_width: Option<usize>,

    /// Longest side allowed when `stitch_width` is None.
    pub max_dimension: usize,

    /// CLAHE settings, when contrast enhancement is on.
    pub contrast: Option<ClaheOptions>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            stitch_width: None,
            max_dimension: DEFAULT_MAX_DIMENSION,
            contrast: None,
        }
    }
}

impl PreprocessOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize to this many stitches across.
    #[must_use]
    pub fn stitch_width(mut self, width: usize) -> Self {
        self.stitch_width = Some(width.max(1));
        self
    }

    /// Cap the longest side when no stitch width is set.
    #[must_use]
    pub fn max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    /// Enable CLAHE contrast enhancement.
    #[must_use]
    pub fn enhance_contrast(mut self, options: ClaheOptions) -> Self {
        self.contrast = Some(options);
        self
    }
}
