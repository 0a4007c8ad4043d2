use std::path::PathBuf;

use stitch_pattern::{ImageError, ParseColorError, PatternError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Catalog JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Catalog contains no threads")]
    Empty,

    #[error("Thread {id} has neither rgb nor hex color")]
    MissingColor { id: String },

    #[error("Thread {id} has an invalid hex color: {source}")]
    InvalidHex {
        id: String,
        #[source]
        source: ParseColorError,
    },

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] stitch_pattern::CatalogError),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("JPEG decode error: {0}")]
    Jpeg(#[from] image::ImageError),

    #[error("Unrecognized image format (expected PNG or JPEG)")]
    UnknownFormat,

    #[error("Unsupported PNG layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedLayout {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Image error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Conversion error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
