//! Image preprocessing ahead of quantization.
//!
//! The pipeline brings a decoded image to stitch resolution and optionally
//! evens out its local contrast:
//!
//! 1. **Resize** (area averaging)
//!    - to the stitch width derived from fabric density and physical width, or
//!    - down to the `max_dimension` cap when no width is requested
//!
//! 2. **Contrast enhancement** (CLAHE on L*)
//!    - runs at stitch resolution, so tiles map to regions of the finished piece
//!    - leaves a*/b* untouched; hues do not drift
//!
//! Resize happens first: one output pixel is one stitch, and every later stage
//! (clustering, dithering, edge detection) works on that grid.
//!
//! # Example
//!
//! ```
//! use stitch_pattern::{PreprocessOptions, Preprocessor, Rgb, RgbImage};
//!
//! let image = RgbImage::filled(200, 100, Rgb::new(90, 120, 200)).unwrap();
//!
//! let options = PreprocessOptions::new().stitch_width(20);
//! let result = Preprocessor::new(options).process(&image);
//!
//! assert_eq!(result.width(), 20);
//! assert_eq!(result.height(), 10);
//! ```

mod clahe;
mod options;
mod preprocessor;
mod resize;
mod stitch;

pub use clahe::enhance_contrast;
pub use options::{ClaheOptions, PreprocessOptions, DEFAULT_MAX_DIMENSION};
pub use preprocessor::Preprocessor;
pub use resize::{fit_within, resize_area, resize_area_to};
pub use stitch::{pixelize, stitch_width, CM_PER_INCH, MAX_STITCH_WIDTH};
