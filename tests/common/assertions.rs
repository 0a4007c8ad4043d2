//! Assertion helpers for tests.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use stitch_pattern::Pattern;

/// Assert the structural invariants every pattern must hold
pub fn assert_valid_pattern(pattern: &Pattern) {
    let grid = &pattern.grid;
    assert_eq!(
        grid.cells().len(),
        grid.width() * grid.height(),
        "Grid cell count does not match its dimensions"
    );
    assert_eq!(grid.width(), pattern.dimensions.width_stitches);
    assert_eq!(grid.height(), pattern.dimensions.height_stitches);

    for &cell in grid.cells() {
        assert!(
            (cell as usize) < pattern.palette.len(),
            "Grid index {cell} out of range for palette of {}",
            pattern.palette.len()
        );
    }

    let symbols: HashSet<_> = pattern.palette.iter().map(|e| e.symbol.as_str()).collect();
    assert_eq!(symbols.len(), pattern.palette.len(), "Symbols must be unique");

    let colors: HashSet<_> = pattern.palette.iter().map(|e| e.rgb).collect();
    assert_eq!(colors.len(), pattern.palette.len(), "Palette colors must be unique");
}

/// Assert every matched thread belongs to `brand`
pub fn assert_single_brand(pattern: &Pattern, brand: &str) {
    for entry in &pattern.palette {
        assert_eq!(
            entry.thread.brand, brand,
            "Entry {} matched {} outside brand filter",
            entry.symbol, entry.thread.id
        );
    }
}
