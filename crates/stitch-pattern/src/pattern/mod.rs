//! Pattern assembly: the final grid, thread list and physical dimensions.

mod assembler;
mod options;
mod symbols;
mod types;

pub use assembler::assemble_pattern;
pub use options::{ConversionOptions, PatternType};
pub use symbols::symbol_for_index;
pub use types::{Dimensions, Grid, PaletteEntry, Pattern, ThreadRef};
