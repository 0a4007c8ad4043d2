//! Perceptual thread matching.
//!
//! Distances are CIE76 Delta E in CIELAB. Threads the caller already owns
//! (the inventory) get their distance scaled by [`INVENTORY_DISCOUNT`] so that
//! a slightly worse thread on hand beats a marginally better one that would
//! have to be bought.

mod delta_e;
mod error;
mod matcher;

pub use delta_e::{delta_e, MatchQuality};
pub use error::MatchError;
pub use matcher::{convert_brand, find_closest_thread, Inventory, MatchResult, INVENTORY_DISCOUNT};
