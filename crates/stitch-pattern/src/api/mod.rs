//! High-level API: the [`PatternConverter`] builder, the unified
//! [`PatternError`] and the [`ConversionBudget`].

mod budget;
mod builder;
mod error;

pub use budget::{ConversionBudget, Stage};
pub use builder::PatternConverter;
pub use error::PatternError;
