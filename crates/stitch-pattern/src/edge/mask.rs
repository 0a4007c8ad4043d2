//! Boolean edge map.

/// One flag per pixel, row-major; `true` marks an edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMask {
    width: usize,
    height: usize,
    edges: Vec<bool>,
}

impl EdgeMask {
    pub(crate) fn from_parts(width: usize, height: usize, edges: Vec<bool>) -> Self {
        debug_assert_eq!(edges.len(), width * height);
        Self {
            width,
            height,
            edges,
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pixel at column `x`, row `y` is an edge.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        self.edges[y * self.width + x]
    }

    /// All flags in row-major order.
    pub fn as_slice(&self) -> &[bool] {
        &self.edges
    }

    /// Number of edge pixels.
    pub fn count(&self) -> usize {
        self.edges.iter().filter(|&&e| e).count()
    }
}
