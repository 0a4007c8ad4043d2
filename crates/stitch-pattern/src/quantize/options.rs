//! Clustering options.

/// Configuration for [`reduce_colors`](super::reduce_colors).
///
/// # Defaults
///
/// - Max colors: 50
/// - Seed: 42
/// - Restarts: 10 (best inertia wins)
/// - Max iterations: 300 per restart
/// - Tolerance: 1e-4 (largest squared centroid shift)
///
/// # Example
///
/// ```
/// use stitch_pattern::QuantizeOptions;
///
/// let options = QuantizeOptions::new(12).seed(7).restarts(3);
/// assert_eq!(options.max_colors, 12);
/// assert_eq!(options.seed, 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeOptions {
    /// Upper bound on palette size.
    pub max_colors: usize,
    /// Seed for centroid initialization.
    pub seed: u64,
    /// Independent initializations to try.
    pub restarts: usize,
    /// Lloyd iterations per restart.
    pub max_iterations: usize,
    /// Convergence threshold on squared centroid movement.
    pub tolerance: f64,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            max_colors: 50,
            seed: 42,
            restarts: 10,
            max_iterations: 300,
            tolerance: 1e-4,
        }
    }
}

impl QuantizeOptions {
    /// Default options with the given palette bound.
    pub fn new(max_colors: usize) -> Self {
        Self {
            max_colors,
            ..Self::default()
        }
    }

    /// Set the initialization seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the number of restarts (at least one).
    #[must_use]
    pub fn restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    /// Set the iteration cap per restart.
    #[must_use]
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }
}
