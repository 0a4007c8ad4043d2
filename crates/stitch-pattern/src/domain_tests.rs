//! Domain-critical regression tests for stitch-pattern.
//!
//! These tests are designed to catch specific classes of bugs, not just
//! confirm happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use std::time::Instant;

    use pretty_assertions::assert_eq;

    use crate::api::{ConversionBudget, PatternConverter, PatternError, Stage};
    use crate::catalog::{Thread, ThreadCatalog};
    use crate::color::{rgb_to_lab, Rgb};
    use crate::dither::apply_dithering;
    use crate::image::RgbImage;
    use crate::matching::{convert_brand, find_closest_thread, Inventory, MatchError, MatchQuality};
    use crate::palette::Palette;
    use crate::pattern::PatternType;
    use crate::quantize::{reduce_colors, QuantizeOptions};

    fn multi_brand_catalog() -> ThreadCatalog {
        ThreadCatalog::new(vec![
            Thread::new("dmc_310", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
            Thread::new("dmc_blanc", "DMC", "BLANC", "White", Rgb::new(255, 255, 255)),
            Thread::new("dmc_321", "DMC", "321", "Red", Rgb::new(199, 43, 59)),
            Thread::new("dmc_699", "DMC", "699", "Green", Rgb::new(5, 101, 23)),
            Thread::new("dmc_797", "DMC", "797", "Royal Blue", Rgb::new(19, 71, 125)),
            Thread::new("anchor_403", "Anchor", "403", "Black", Rgb::new(0, 0, 0)),
            Thread::new("anchor_1", "Anchor", "1", "White", Rgb::new(255, 255, 255)),
            Thread::new("anchor_9046", "Anchor", "9046", "Red", Rgb::new(200, 30, 50)),
        ])
        .unwrap()
    }

    /// Varied test image with more distinct colors than any palette below.
    fn gradient_image(width: usize, height: usize) -> RgbImage {
        let pixels = (0..width * height)
            .map(|i| {
                let x = i % width;
                let y = i / width;
                Rgb::new(
                    (x * 255 / width.max(1)) as u8,
                    (y * 255 / height.max(1)) as u8,
                    ((x + y) * 127 / (width + height)) as u8,
                )
            })
            .collect();
        RgbImage::new(width, height, pixels).unwrap()
    }

    // ========================================================================
    // Matching policy
    // ========================================================================

    /// If this breaks, it means: the inventory discount is no longer applied
    /// (or applied to the wrong thread). Mid grey (L* 53.6) is closer to
    /// white (Delta E 46.4) than to black (53.6); owning black brings it to
    /// 42.9 and must flip the choice, while owning white keeps white.
    #[test]
    fn test_inventory_discount_flips_close_call() {
        let catalog = ThreadCatalog::new(vec![
            Thread::new("black", "DMC", "310", "Black", Rgb::new(0, 0, 0)),
            Thread::new("white", "DMC", "BLANC", "White", Rgb::new(255, 255, 255)),
        ])
        .unwrap();
        let grey = Rgb::new(128, 128, 128);

        let plain = find_closest_thread(grey, &catalog, None, None).unwrap();
        assert_eq!(plain.thread.id(), "white");
        assert!(!plain.from_inventory);

        let owns_white: Inventory = ["white".to_string()].into_iter().collect();
        let owned = find_closest_thread(grey, &catalog, None, Some(&owns_white)).unwrap();
        assert_eq!(owned.thread.id(), "white");
        assert!(owned.from_inventory);

        let owns_black: Inventory = ["black".to_string()].into_iter().collect();
        let owned = find_closest_thread(grey, &catalog, None, Some(&owns_black)).unwrap();
        assert_eq!(owned.thread.id(), "black");
        assert!(owned.from_inventory);
    }

    /// If this breaks, it means: the brand filter leaks threads from other
    /// brands into the candidate set.
    #[test]
    fn test_brand_filter_never_crosses_brands() {
        let catalog = multi_brand_catalog();
        for pixel in gradient_image(12, 12).pixels() {
            let result = find_closest_thread(*pixel, &catalog, Some("Anchor"), None).unwrap();
            assert_eq!(result.thread.brand(), "Anchor");
        }
    }

    /// If this breaks, it means: the search stopped minimizing Delta E, e.g.
    /// by comparing RGB distances or keeping the last candidate on ties.
    #[test]
    fn test_match_minimizes_delta_e() {
        let catalog = multi_brand_catalog();
        for pixel in gradient_image(10, 10).pixels() {
            let result = find_closest_thread(*pixel, &catalog, None, None).unwrap();
            let target = rgb_to_lab(*pixel);
            for thread in catalog.threads() {
                assert!(result.distance <= crate::matching::delta_e(target, thread.lab()) + 1e-9);
            }
        }
    }

    /// If this breaks, it means: quality buckets drifted from the 2.0 / 5.0
    /// Delta E boundaries users see in the thread list.
    #[test]
    fn test_quality_bucket_boundaries() {
        assert_eq!(MatchQuality::from_distance(1.5), MatchQuality::Excellent);
        assert_eq!(MatchQuality::from_distance(3.0), MatchQuality::Good);
        assert_eq!(MatchQuality::from_distance(7.0), MatchQuality::Acceptable);
    }

    /// If this breaks, it means: brand conversion treats an unknown source
    /// code as an error, or an empty target brand as a silent miss.
    #[test]
    fn test_convert_brand_miss_vs_failure() {
        let catalog = multi_brand_catalog();
        assert_eq!(
            convert_brand("321", "DMC", "Anchor", &catalog)
                .unwrap()
                .map(|t| t.id()),
            Some("anchor_9046")
        );
        assert!(convert_brand("000", "DMC", "Anchor", &catalog)
            .unwrap()
            .is_none());
        assert_eq!(
            convert_brand("321", "DMC", "Madeira", &catalog).unwrap_err(),
            MatchError::NoCandidateThread {
                brand: Some("Madeira".to_string())
            }
        );
    }

    // ========================================================================
    // Quantization and dithering
    // ========================================================================

    /// If this breaks, it means: the palette can exceed the requested size,
    /// repeat a color, or labels point past the end of the palette.
    #[test]
    fn test_palette_bounded_unique_and_labels_valid() {
        let image = gradient_image(40, 30);
        for max_colors in [1, 3, 8, 20] {
            let q = reduce_colors(&image, &QuantizeOptions::new(max_colors).restarts(2));
            assert!(q.palette.len() <= max_colors);
            // Palette::new re-validates uniqueness
            assert!(Palette::new(q.palette.colors().to_vec()).is_ok());
            assert!(q.labels.iter().all(|&l| (l as usize) < q.palette.len()));
        }
    }

    /// If this breaks, it means: clustering depends on something other than
    /// the image, the options and the seed (global RNG, hash order, thread
    /// scheduling in the parallel assignment step).
    #[test]
    fn test_conversion_is_deterministic() {
        let catalog = multi_brand_catalog();
        let image = gradient_image(48, 32);
        let converter = PatternConverter::new(&catalog)
            .max_colors(6)
            .restarts(3)
            .dithering(true)
            .seed(2024);

        let a = converter.convert(&image).unwrap();
        let b = converter.convert(&image).unwrap();
        assert_eq!(a, b);
    }

    /// If this breaks, it means: dithering writes colors outside the palette
    /// or invents error on pixels that already match exactly.
    #[test]
    fn test_dithering_stays_on_palette() {
        let image = gradient_image(24, 24);
        let q = reduce_colors(&image, &QuantizeOptions::new(5).restarts(1));
        let dithered = apply_dithering(&image, &q.palette);

        for (&p, &i) in dithered.image.pixels().iter().zip(&dithered.indices) {
            assert_eq!(q.palette.colors()[i as usize], p);
        }

        let solid = RgbImage::filled(9, 9, q.palette.colors()[0]).unwrap();
        let exact = apply_dithering(&solid, &q.palette);
        assert!(exact.indices.iter().all(|&i| i == 0));
    }

    // ========================================================================
    // End to end
    // ========================================================================

    /// If this breaks, it means: the smallest possible conversion no longer
    /// round-trips (solid color -> one palette entry -> nearest thread).
    #[test]
    fn test_solid_red_end_to_end() {
        let catalog = multi_brand_catalog();
        let red = Rgb::new(200, 40, 60);
        let image = RgbImage::filled(2, 2, red).unwrap();

        let pattern = PatternConverter::new(&catalog)
            .max_colors(1)
            .brand("DMC")
            .convert(&image)
            .unwrap();

        assert_eq!(pattern.palette.len(), 1);
        assert_eq!(pattern.palette[0].rgb, red);
        assert_eq!(pattern.palette[0].thread.id, "dmc_321");
        assert_eq!(pattern.palette[0].symbol, "A");
        assert!(pattern.grid.cells().iter().all(|&c| c == 0));
        assert_eq!(pattern.estimated_minutes, 2);
        assert_eq!(pattern.color_counts(), vec![4]);
    }

    /// If this breaks, it means: outline mode lost its two-color contract or
    /// stopped checking that the two colors differ.
    #[test]
    fn test_outline_contract() {
        let catalog = multi_brand_catalog();
        let image = gradient_image(20, 20);

        let same = PatternConverter::new(&catalog)
            .pattern_type(PatternType::Outline)
            .outline_colors(Rgb::new(9, 9, 9), Rgb::new(9, 9, 9))
            .convert(&image)
            .unwrap_err();
        assert!(matches!(same, PatternError::InvalidOptions(_)));

        let pattern = PatternConverter::new(&catalog)
            .pattern_type(PatternType::Outline)
            .edge_thresholds(5.0, 10.0)
            .convert(&image)
            .unwrap();
        assert!(pattern.palette.len() <= 2);
        assert!(pattern
            .grid
            .cells()
            .iter()
            .all(|&c| (c as usize) < pattern.palette.len()));
    }

    /// If this breaks, it means: a cancelled or expired conversion returns
    /// a pattern (possibly partial) instead of failing.
    #[test]
    fn test_exhausted_budget_never_yields_pattern() {
        let catalog = multi_brand_catalog();
        let image = gradient_image(16, 16);

        let cancelled = PatternConverter::new(&catalog)
            .budget(ConversionBudget::unlimited().with_cancel_flag(Arc::new(AtomicBool::new(true))))
            .convert(&image);
        assert!(matches!(
            cancelled,
            Err(PatternError::Cancelled {
                stage: Stage::Preprocess
            })
        ));

        let expired = PatternConverter::new(&catalog)
            .budget(ConversionBudget::unlimited().with_deadline(Instant::now()))
            .convert(&image);
        assert!(matches!(
            expired,
            Err(PatternError::DeadlineExceeded { .. })
        ));
    }

    /// If this breaks, it means: the JSON shape consumed by the CLI changed.
    #[test]
    fn test_pattern_serializes_rows_and_lowercase_quality() {
        let catalog = multi_brand_catalog();
        let image = RgbImage::new(
            2,
            2,
            vec![
                Rgb::new(0, 0, 0),
                Rgb::new(255, 255, 255),
                Rgb::new(255, 255, 255),
                Rgb::new(0, 0, 0),
            ],
        )
        .unwrap();
        let pattern = PatternConverter::new(&catalog).convert(&image).unwrap();
        let json = serde_json::to_value(&pattern).unwrap();

        assert_eq!(json["pattern_type"], "cross_stitch");
        assert_eq!(json["grid"]["rows"], serde_json::json!([[0, 1], [1, 0]]));
        assert_eq!(json["palette"][0]["quality"], "excellent");
        assert_eq!(json["palette"][1]["rgb"], serde_json::json!([255, 255, 255]));
        assert_eq!(json["palette"][1]["symbol"], "B");
    }
}
