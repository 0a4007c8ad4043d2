//! Thread catalog: the read-only set of physical threads available for
//! matching.
//!
//! The catalog is built once from [`ThreadRecord`]s (typically loaded by the
//! application from a file) and then shared immutably, usually behind an
//! `Arc`, by every conversion that runs. Nothing in the core mutates it.

mod catalog;
mod error;
mod thread;

pub use catalog::ThreadCatalog;
pub use error::CatalogError;
pub use thread::{Thread, ThreadRecord};
