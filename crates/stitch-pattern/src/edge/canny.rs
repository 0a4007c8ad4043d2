//! Canny edge detector.
//!
//! Stages: luminance, 5x5 Gaussian blur, Sobel gradients (L1 magnitude),
//! non-maximum suppression along the quantized gradient direction, and
//! double-threshold hysteresis with 8-connectivity.

use crate::image::RgbImage;

use super::mask::EdgeMask;

/// Gaussian sigma for the 5x5 smoothing kernel.
const SIGMA: f64 = 1.1;

/// Hysteresis thresholds on the L1 gradient magnitude.
///
/// # Example
///
/// ```
/// use stitch_pattern::EdgeOptions;
///
/// let options = EdgeOptions::new(30.0, 90.0);
/// assert_eq!(options.low_threshold, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeOptions {
    /// Weak edge threshold
    pub low_threshold: f64,
    /// Strong edge threshold
    pub high_threshold: f64,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
        }
    }
}

impl EdgeOptions {
    /// Thresholds; swapped if `low > high`.
    pub fn new(low_threshold: f64, high_threshold: f64) -> Self {
        if low_threshold > high_threshold {
            Self {
                low_threshold: high_threshold,
                high_threshold: low_threshold,
            }
        } else {
            Self {
                low_threshold,
                high_threshold,
            }
        }
    }
}

/// Row-major f64 plane with clamped (replicated border) reads.
struct Plane {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl Plane {
    #[inline]
    fn at(&self, x: isize, y: isize) -> f64 {
        let x = x.clamp(0, self.width as isize - 1) as usize;
        let y = y.clamp(0, self.height as isize - 1) as usize;
        self.data[y * self.width + x]
    }
}

fn gaussian_kernel() -> [f64; 5] {
    let mut kernel = [0.0; 5];
    for (i, k) in kernel.iter_mut().enumerate() {
        let d = i as f64 - 2.0;
        *k = (-(d * d) / (2.0 * SIGMA * SIGMA)).exp();
    }
    let sum: f64 = kernel.iter().sum();
    kernel.map(|k| k / sum)
}

fn blur(plane: &Plane) -> Plane {
    let kernel = gaussian_kernel();
    let (w, h) = (plane.width, plane.height);

    let mut horizontal = Plane {
        width: w,
        height: h,
        data: vec![0.0; w * h],
    };
    for y in 0..h {
        for x in 0..w {
            horizontal.data[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(i, k)| k * plane.at(x as isize + i as isize - 2, y as isize))
                .sum();
        }
    }

    let mut out = Plane {
        width: w,
        height: h,
        data: vec![0.0; w * h],
    };
    for y in 0..h {
        for x in 0..w {
            out.data[y * w + x] = kernel
                .iter()
                .enumerate()
                .map(|(i, k)| k * horizontal.at(x as isize, y as isize + i as isize - 2))
                .sum();
        }
    }
    out
}

/// Quantized gradient direction.
#[derive(Clone, Copy)]
enum Direction {
    Horizontal,
    Diagonal,
    Vertical,
    AntiDiagonal,
}

impl Direction {
    /// Classify a gradient into one of four sectors of 45 degrees.
    fn of(gx: f64, gy: f64) -> Self {
        let mut angle = gy.atan2(gx).to_degrees();
        if angle < 0.0 {
            angle += 180.0;
        }
        if !(22.5..157.5).contains(&angle) {
            Direction::Horizontal
        } else if angle < 67.5 {
            Direction::Diagonal
        } else if angle < 112.5 {
            Direction::Vertical
        } else {
            Direction::AntiDiagonal
        }
    }

    /// Neighbour offsets along the gradient (image y grows downward).
    fn offsets(self) -> [(isize, isize); 2] {
        match self {
            Direction::Horizontal => [(-1, 0), (1, 0)],
            Direction::Diagonal => [(-1, -1), (1, 1)],
            Direction::Vertical => [(0, -1), (0, 1)],
            Direction::AntiDiagonal => [(1, -1), (-1, 1)],
        }
    }
}

/// Detect edges in `image`.
///
/// Pixels whose suppressed gradient exceeds `high_threshold` are edges; those
/// above `low_threshold` are edges only when 8-connected, directly or through
/// other such pixels, to a strong edge.
///
/// # Example
///
/// ```
/// use stitch_pattern::{detect_edges, EdgeOptions, Rgb, RgbImage};
///
/// let flat = RgbImage::filled(10, 10, Rgb::new(90, 90, 90)).unwrap();
/// assert_eq!(detect_edges(&flat, &EdgeOptions::default()).count(), 0);
/// ```
pub fn detect_edges(image: &RgbImage, options: &EdgeOptions) -> EdgeMask {
    let options = EdgeOptions::new(options.low_threshold, options.high_threshold);
    let (w, h) = (image.width(), image.height());

    let gray = Plane {
        width: w,
        height: h,
        data: image
            .pixels()
            .iter()
            .map(|p| 0.299 * p.r as f64 + 0.587 * p.g as f64 + 0.114 * p.b as f64)
            .collect(),
    };
    let smooth = blur(&gray);

    // Sobel
    let mut magnitude = vec![0.0f64; w * h];
    let mut direction = vec![Direction::Horizontal; w * h];
    for y in 0..h as isize {
        for x in 0..w as isize {
            let p = |dx: isize, dy: isize| smooth.at(x + dx, y + dy);
            let gx = (p(1, -1) + 2.0 * p(1, 0) + p(1, 1)) - (p(-1, -1) + 2.0 * p(-1, 0) + p(-1, 1));
            let gy = (p(-1, 1) + 2.0 * p(0, 1) + p(1, 1)) - (p(-1, -1) + 2.0 * p(0, -1) + p(1, -1));
            let i = y as usize * w + x as usize;
            magnitude[i] = gx.abs() + gy.abs();
            direction[i] = Direction::of(gx, gy);
        }
    }

    // Non-maximum suppression; out-of-image neighbours count as zero
    let mag_at = |x: isize, y: isize| {
        if x < 0 || y < 0 || x >= w as isize || y >= h as isize {
            0.0
        } else {
            magnitude[y as usize * w + x as usize]
        }
    };
    let mut suppressed = vec![0.0f64; w * h];
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let m = magnitude[i];
            let [(ax, ay), (bx, by)] = direction[i].offsets();
            let a = mag_at(x as isize + ax, y as isize + ay);
            let b = mag_at(x as isize + bx, y as isize + by);
            if m >= a && m > b {
                suppressed[i] = m;
            }
        }
    }

    // Hysteresis
    let mut edges = vec![false; w * h];
    let mut stack: Vec<usize> = suppressed
        .iter()
        .enumerate()
        .filter(|(_, &m)| m > options.high_threshold)
        .map(|(i, _)| i)
        .collect();
    for &i in &stack {
        edges[i] = true;
    }
    while let Some(i) = stack.pop() {
        let (x, y) = ((i % w) as isize, (i / w) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let n = ny as usize * w + nx as usize;
                if !edges[n] && suppressed[n] > options.low_threshold {
                    edges[n] = true;
                    stack.push(n);
                }
            }
        }
    }

    let mask = EdgeMask::from_parts(w, h, edges);
    tracing::debug!(
        width = w,
        height = h,
        edges = mask.count(),
        low = options.low_threshold,
        high = options.high_threshold,
        "Detected edges"
    );
    mask
}
