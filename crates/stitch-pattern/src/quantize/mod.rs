//! Palette reduction by weighted k-means.
//!
//! Pixels are first collapsed to their distinct colors with multiplicities,
//! so clustering cost scales with color variety rather than image size.
//! Weighted clustering over distinct colors converges to the same centroids
//! as clustering every pixel.

mod kmeans;
mod options;

pub use kmeans::{reduce_colors, Quantized};
pub use options::QuantizeOptions;
