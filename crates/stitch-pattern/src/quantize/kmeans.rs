//! Weighted k-means with seeded k-means++ initialization.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::color::Rgb;
use crate::image::RgbImage;
use crate::palette::Palette;

use super::options::QuantizeOptions;

/// Largest palette a `u16` grid can index.
const MAX_CLUSTERS: usize = u16::MAX as usize + 1;

/// Result of palette reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// Reduced palette; at most `max_colors` entries, possibly fewer.
    pub palette: Palette,
    /// Palette index per pixel, row-major.
    pub labels: Vec<u16>,
}

/// Distinct colors of an image with their pixel counts.
struct Samples {
    points: Vec<[f64; 3]>,
    weights: Vec<f64>,
    colors: Vec<Rgb>,
    /// Sample index per pixel
    pixel_sample: Vec<usize>,
}

impl Samples {
    fn collect(image: &RgbImage) -> Self {
        let mut index: HashMap<Rgb, usize> = HashMap::new();
        let mut colors = Vec::new();
        let mut weights = Vec::new();
        let mut pixel_sample = Vec::with_capacity(image.pixels().len());

        for &p in image.pixels() {
            let i = *index.entry(p).or_insert_with(|| {
                colors.push(p);
                weights.push(0.0);
                colors.len() - 1
            });
            weights[i] += 1.0;
            pixel_sample.push(i);
        }

        Self {
            points: colors.iter().map(|c| c.to_f64()).collect(),
            weights,
            colors,
            pixel_sample,
        }
    }
}

/// One clustering run.
struct Run {
    centroids: Vec<[f64; 3]>,
    assignment: Vec<usize>,
    inertia: f64,
}

#[inline]
fn dist2(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    d0 * d0 + d1 * d1 + d2 * d2
}

/// Nearest centroid, ties to the lowest index.
#[inline]
fn nearest(point: &[f64; 3], centroids: &[[f64; 3]]) -> (usize, f64) {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = dist2(point, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    (best, best_dist)
}

/// Draw an index with probability proportional to `weights`.
fn weighted_pick(rng: &mut StdRng, weights: &[f64]) -> usize {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0;
    }
    let target = rng.gen::<f64>() * total;
    let mut acc = 0.0;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            acc += w;
            last_positive = i;
            if acc > target {
                return i;
            }
        }
    }
    last_positive
}

/// k-means++ seeding, weighting each distinct color by its pixel count.
fn seed_centroids(samples: &Samples, k: usize, rng: &mut StdRng) -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(samples.points[weighted_pick(rng, &samples.weights)]);

    let mut min_dist: Vec<f64> = samples
        .points
        .par_iter()
        .map(|p| dist2(p, &centroids[0]))
        .collect();

    while centroids.len() < k {
        let scores: Vec<f64> = min_dist
            .iter()
            .zip(&samples.weights)
            .map(|(d, w)| d * w)
            .collect();
        let next = samples.points[weighted_pick(rng, &scores)];
        min_dist
            .par_iter_mut()
            .zip(samples.points.par_iter())
            .for_each(|(d, p)| *d = d.min(dist2(p, &next)));
        centroids.push(next);
    }

    centroids
}

fn assign(samples: &Samples, centroids: &[[f64; 3]]) -> (Vec<usize>, f64) {
    let nearest: Vec<(usize, f64)> = samples
        .points
        .par_iter()
        .map(|p| nearest(p, centroids))
        .collect();
    let inertia = nearest
        .iter()
        .zip(&samples.weights)
        .map(|((_, d), w)| d * w)
        .sum();
    (nearest.into_iter().map(|(i, _)| i).collect(), inertia)
}

fn lloyd(samples: &Samples, mut centroids: Vec<[f64; 3]>, options: &QuantizeOptions) -> Run {
    let k = centroids.len();

    for _ in 0..options.max_iterations {
        let (assignment, _) = assign(samples, &centroids);

        let mut sums = vec![[0.0f64; 3]; k];
        let mut counts = vec![0.0f64; k];
        for ((p, &w), &c) in samples.points.iter().zip(&samples.weights).zip(&assignment) {
            sums[c][0] += p[0] * w;
            sums[c][1] += p[1] * w;
            sums[c][2] += p[2] * w;
            counts[c] += w;
        }

        let mut shift: f64 = 0.0;
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            // Empty clusters keep their previous centroid
            if count > 0.0 {
                let updated = [sum[0] / count, sum[1] / count, sum[2] / count];
                shift = shift.max(dist2(centroid, &updated));
                *centroid = updated;
            }
        }

        if shift < options.tolerance {
            break;
        }
    }

    let (assignment, inertia) = assign(samples, &centroids);
    Run {
        centroids,
        assignment,
        inertia,
    }
}

/// Reduce `image` to at most `options.max_colors` colors.
///
/// Returns the palette and a palette index per pixel. When the image has no
/// more distinct colors than requested, the palette is exactly those colors
/// in order of first appearance. Otherwise the palette holds the k-means
/// centroids (truncated to 8 bits) of the lowest-inertia restart; clusters
/// that end up empty are dropped and centroids that truncate to the same
/// color are merged, so the palette may be smaller than requested.
///
/// A `max_colors` of zero is treated as one.
///
/// # Example
///
/// ```
/// use stitch_pattern::{reduce_colors, QuantizeOptions, Rgb, RgbImage};
///
/// let image = RgbImage::new(
///     3,
///     1,
///     vec![Rgb::new(0, 0, 0), Rgb::new(250, 250, 250), Rgb::new(255, 255, 255)],
/// )
/// .unwrap();
///
/// let result = reduce_colors(&image, &QuantizeOptions::new(2));
/// assert_eq!(result.palette.len(), 2);
/// assert_eq!(result.labels[1], result.labels[2]);
/// ```
pub fn reduce_colors(image: &RgbImage, options: &QuantizeOptions) -> Quantized {
    let samples = Samples::collect(image);
    let k = options
        .max_colors
        .clamp(1, MAX_CLUSTERS)
        .min(samples.colors.len());

    if samples.colors.len() <= k {
        tracing::debug!(
            distinct = samples.colors.len(),
            max_colors = options.max_colors,
            "Image already within palette bound"
        );
        let labels = samples.pixel_sample.iter().map(|&i| i as u16).collect();
        return Quantized {
            palette: Palette::from_unique(samples.colors),
            labels,
        };
    }

    let run_restart = |restart: usize| {
        let mut rng = StdRng::seed_from_u64(options.seed.wrapping_add(restart as u64));
        let initial = seed_centroids(&samples, k, &mut rng);
        let run = lloyd(&samples, initial, options);
        tracing::trace!(restart, inertia = run.inertia, "k-means restart finished");
        run
    };

    let mut best = run_restart(0);
    for restart in 1..options.restarts.max(1) {
        let run = run_restart(restart);
        if run.inertia < best.inertia {
            best = run;
        }
    }

    // Drop empty clusters, merge centroids equal after truncation
    let mut used = vec![false; k];
    for &c in &best.assignment {
        used[c] = true;
    }
    let mut colors: Vec<Rgb> = Vec::with_capacity(k);
    let mut position: HashMap<Rgb, usize> = HashMap::with_capacity(k);
    let mut remap = vec![0u16; k];
    for (cluster, centroid) in best.centroids.iter().enumerate() {
        if !used[cluster] {
            continue;
        }
        let color = Rgb::from_f64_truncated(*centroid);
        let index = *position.entry(color).or_insert_with(|| {
            colors.push(color);
            colors.len() - 1
        });
        remap[cluster] = index as u16;
    }

    let labels = samples
        .pixel_sample
        .iter()
        .map(|&s| remap[best.assignment[s]])
        .collect();

    tracing::debug!(
        distinct = samples.colors.len(),
        k,
        palette = colors.len(),
        inertia = best.inertia,
        "Reduced colors"
    );

    Quantized {
        palette: Palette::from_unique(colors),
        labels,
    }
}
