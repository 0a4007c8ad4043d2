//! Mulina - cross-stitch patterns from images
//!
//! File-based front end for the `stitch_pattern` crate: configuration,
//! embedded assets, catalog loading and PNG/JPEG decoding.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
