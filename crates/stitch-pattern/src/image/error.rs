//! Error type for malformed pixel buffers.

/// The input pixel buffer cannot be used as an image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// One of the dimensions is zero (or their product overflows)
    #[error("invalid image dimensions: {width}x{height}")]
    EmptyImage {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// Pixel buffer length does not match the dimensions
    #[error("pixel buffer has {actual} entries, expected {expected}")]
    BufferSizeMismatch {
        /// `width * height` (or bytes, for packed input)
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}
