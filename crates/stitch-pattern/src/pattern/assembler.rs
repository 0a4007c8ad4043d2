//! Runs the conversion stages and assembles the [`Pattern`].

use crate::api::{ConversionBudget, PatternError, Stage};
use crate::catalog::ThreadCatalog;
use crate::dither::apply_dithering;
use crate::edge::detect_edges;
use crate::image::RgbImage;
use crate::matching::find_closest_thread;
use crate::palette::Palette;
use crate::preprocess::{stitch_width, ClaheOptions, PreprocessOptions, Preprocessor, CM_PER_INCH};
use crate::quantize::{reduce_colors, QuantizeOptions};

use super::options::{ConversionOptions, PatternType};
use super::symbols::symbol_for_index;
use super::types::{Dimensions, Grid, PaletteEntry, Pattern, ThreadRef};

/// Minutes per stitch for the completion estimate.
const MINUTES_PER_STITCH: f64 = 0.5;

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn preprocess_options(options: &ConversionOptions) -> PreprocessOptions {
    let mut pre = PreprocessOptions::new().max_dimension(options.max_dimension);
    if let Some(cm) = options.target_width_cm {
        pre = pre.stitch_width(stitch_width(options.aida_count, cm));
    }
    if options.enhance_contrast {
        pre = pre.enhance_contrast(ClaheOptions::new());
    }
    pre
}

/// Palette and grid cells for a cross stitch.
fn cross_stitch(image: &RgbImage, options: &ConversionOptions) -> (Palette, Vec<u16>) {
    let quantize = QuantizeOptions::new(options.max_colors)
        .seed(options.seed)
        .restarts(options.restarts);
    let quantized = reduce_colors(image, &quantize);

    if options.dithering {
        let dithered = apply_dithering(image, &quantized.palette);
        (quantized.palette, dithered.indices)
    } else {
        (quantized.palette, quantized.labels)
    }
}

/// Palette and grid cells for an outline: 0 is background, 1 is line.
fn outline(image: &RgbImage, options: &ConversionOptions) -> (Palette, Vec<u16>) {
    let mask = detect_edges(image, &options.edge);
    if mask.count() == 0 {
        tracing::info!("No edges found, outline pattern is background only");
        return (
            Palette::from_unique(vec![options.background]),
            vec![0; mask.as_slice().len()],
        );
    }

    let cells = mask.as_slice().iter().map(|&edge| u16::from(edge)).collect();
    (
        Palette::from_unique(vec![options.background, options.outline]),
        cells,
    )
}

/// Convert `image` into a pattern of `catalog` threads.
///
/// Stages run in order (preprocess, quantize, match, assemble) and `budget`
/// is checked before each one; an exhausted budget aborts the conversion
/// without producing a partial pattern.
///
/// # Errors
///
/// - [`PatternError::InvalidOptions`] for unusable parameters
/// - [`PatternError::Match`] when no thread can be matched (empty catalog or
///   unknown brand)
/// - [`PatternError::Cancelled`] / [`PatternError::DeadlineExceeded`]
pub fn assemble_pattern(
    image: &RgbImage,
    catalog: &ThreadCatalog,
    options: &ConversionOptions,
    budget: &ConversionBudget,
) -> Result<Pattern, PatternError> {
    options.validate()?;

    budget.check(Stage::Preprocess)?;
    let stitched = Preprocessor::new(preprocess_options(options)).process(image);
    let (width, height) = (stitched.width(), stitched.height());

    budget.check(Stage::Quantize)?;
    let (palette, cells) = match options.pattern_type {
        PatternType::CrossStitch => cross_stitch(&stitched, options),
        PatternType::Outline => outline(&stitched, options),
    };

    budget.check(Stage::Match)?;
    let entries = palette
        .colors()
        .iter()
        .enumerate()
        .map(|(index, &rgb)| -> Result<PaletteEntry, PatternError> {
            let result = find_closest_thread(
                rgb,
                catalog,
                options.brand.as_deref(),
                Some(&options.inventory),
            )?;
            Ok(PaletteEntry {
                rgb,
                symbol: symbol_for_index(index),
                thread: ThreadRef::from(result.thread),
                delta_e: result.distance,
                quality: result.quality,
                from_inventory: result.from_inventory,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    budget.check(Stage::Assemble)?;
    let cm_per_stitch = CM_PER_INCH / options.aida_count as f64;
    let dimensions = Dimensions {
        width_stitches: width,
        height_stitches: height,
        width_cm: round_to_tenth(width as f64 * cm_per_stitch),
        height_cm: round_to_tenth(height as f64 * cm_per_stitch),
        aida_count: options.aida_count,
    };
    let estimated_minutes = ((width * height) as f64 * MINUTES_PER_STITCH).floor() as u64;

    tracing::info!(
        pattern_type = ?options.pattern_type,
        width,
        height,
        colors = entries.len(),
        estimated_minutes,
        "Assembled pattern"
    );

    Ok(Pattern {
        pattern_type: options.pattern_type,
        grid: Grid::from_parts(width, height, cells),
        palette: entries,
        dimensions,
        estimated_minutes,
    })
}
