//! Output types of a conversion.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::catalog::Thread;
use crate::color::Rgb;
use crate::matching::MatchQuality;

use super::options::PatternType;

/// Palette indices laid out on the stitch grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u16>,
}

impl Grid {
    pub(crate) fn from_parts(width: usize, height: usize, cells: Vec<u16>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            width,
            height,
            cells,
        }
    }

    /// Width in stitches.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in stitches.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette index at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u16 {
        self.cells[y * self.width + x]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u16]> + '_ {
        self.cells.chunks_exact(self.width)
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Grid", 3)?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("rows", &self.rows().collect::<Vec<_>>())?;
        state.end()
    }
}

/// The catalog thread a palette color was matched to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadRef {
    /// Catalog identifier
    pub id: String,
    /// Brand name
    pub brand: String,
    /// Brand-specific code
    pub code: String,
    /// Display name
    pub name: String,
    /// Thread color
    pub rgb: Rgb,
}

impl From<&Thread> for ThreadRef {
    fn from(thread: &Thread) -> Self {
        Self {
            id: thread.id().to_string(),
            brand: thread.brand().to_string(),
            code: thread.code().to_string(),
            name: thread.name().to_string(),
            rgb: thread.rgb(),
        }
    }
}

/// One palette color and the thread that stitches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    /// Palette color as produced by quantization
    pub rgb: Rgb,
    /// Chart symbol
    pub symbol: String,
    /// Matched thread
    pub thread: ThreadRef,
    /// Delta E between palette color and thread (after inventory discount)
    pub delta_e: f64,
    /// Quality bucket of `delta_e`
    pub quality: MatchQuality,
    /// Whether the thread is in the caller's inventory
    pub from_inventory: bool,
}

/// Physical size of the finished piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dimensions {
    /// Stitches across
    pub width_stitches: usize,
    /// Stitches down
    pub height_stitches: usize,
    /// Width in centimeters, to 0.1 cm
    pub width_cm: f64,
    /// Height in centimeters, to 0.1 cm
    pub height_cm: f64,
    /// Fabric density in stitches per inch
    pub aida_count: u32,
}

/// An assembled, immutable embroidery pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    /// Cross-stitch fill or edge outline
    pub pattern_type: PatternType,
    /// Stitch grid of palette indices
    pub grid: Grid,
    /// Palette, indexed by grid cells
    pub palette: Vec<PaletteEntry>,
    /// Physical dimensions
    pub dimensions: Dimensions,
    /// Rough stitching time
    pub estimated_minutes: u64,
}

impl Pattern {
    /// Total number of stitches.
    pub fn stitch_count(&self) -> usize {
        self.grid.width() * self.grid.height()
    }

    /// Number of cells using each palette entry, in palette order.
    pub fn color_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.palette.len()];
        for &cell in self.grid.cells() {
            counts[cell as usize] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rows() {
        let grid = Grid::from_parts(3, 2, vec![0, 1, 2, 3, 4, 5]);
        let rows: Vec<&[u16]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 2][..], &[3, 4, 5][..]]);
        assert_eq!(grid.get(1, 1), 4);
    }
}
