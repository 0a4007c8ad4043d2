//! Preprocessing pipeline: resize to stitch resolution, then contrast.

use crate::image::RgbImage;

use super::clahe::enhance_contrast;
use super::options::PreprocessOptions;
use super::resize::{fit_within, resize_area};

/// Applies [`PreprocessOptions`] to images.
///
/// Holds no per-image state; one preprocessor can serve many images.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    options: PreprocessOptions,
}

impl Preprocessor {
    /// Create a preprocessor with the given options.
    pub fn new(options: PreprocessOptions) -> Self {
        Self { options }
    }

    /// The options this preprocessor applies.
    pub fn options(&self) -> &PreprocessOptions {
        &self.options
    }

    /// Resize `image` to stitch resolution and optionally enhance contrast.
    pub fn process(&self, image: &RgbImage) -> RgbImage {
        let resized = match self.options.stitch_width {
            Some(width) => resize_area(image, width),
            None => fit_within(image, self.options.max_dimension),
        };

        tracing::debug!(
            width = resized.width(),
            height = resized.height(),
            "Resized to stitch grid"
        );

        match &self.options.contrast {
            Some(clahe) => enhance_contrast(&resized, clahe),
            None => resized,
        }
    }
}
