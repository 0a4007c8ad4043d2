//! Canny edge detection for outline patterns.

mod canny;
mod mask;

pub use canny::{detect_edges, EdgeOptions};
pub use mask::EdgeMask;
