//! Error diffusion dithering onto a fixed palette.
//!
//! Dithering trades spatial resolution for apparent color depth: the
//! quantization error of each stitch is pushed onto stitches not yet visited,
//! so regions average out to colors the palette does not contain.
//!
//! Processing is strictly row-major. Each pixel reads error its predecessors
//! left behind, so the traversal is sequential by construction; the
//! [`ErrorBuffer`] holds just the rows the kernel can reach.

mod floyd_steinberg;

pub use floyd_steinberg::{apply_dithering, Dithered};

/// Sliding window of accumulated diffusion error.
///
/// Tracks one row per kernel reach (`max_dy + 1`). Usage:
///
/// 1. Create with `ErrorBuffer::new(width, max_dy + 1)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub(crate) struct ErrorBuffer {
    /// rows[0] is the current row, rows[1] the next, and so on
    rows: Vec<Vec<[f64; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    pub(crate) fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    #[inline]
    pub(crate) fn get_accumulated(&self, x: usize) -> [f64; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Out-of-bounds targets are ignored.
    #[inline]
    pub(crate) fn add_error(&mut self, x: usize, row_offset: usize, error: [f64; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Drop the current row and open a zeroed one at the far end.
    pub(crate) fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}
