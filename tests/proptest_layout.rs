//! Property tests for crop sizing and sheet tiling.

use printsheet::grid::{ForcedGrid, LayoutOptions, compute_layout};
use printsheet::sheet::{SheetSize, SheetSpec, mm_to_px};
use printsheet::standard::{CATALOG, PhotoStandard};
use printsheet::{CropRect, SheetError, plan_crop};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

const EPS: f64 = 1e-6;

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config
}

fn arb_sheet() -> impl Strategy<Value = SheetSpec> {
    prop::sample::select(vec![
        SheetSpec::portrait(SheetSize::Photo4x6),
        SheetSpec::landscape(SheetSize::Photo4x6),
        SheetSpec::portrait(SheetSize::A4),
        SheetSpec::landscape(SheetSize::A4),
    ])
}

fn arb_standard() -> impl Strategy<Value = PhotoStandard<'static>> {
    prop_oneof![
        prop::sample::select(CATALOG.to_vec()),
        (10.0f64..90.0, 10.0f64..90.0)
            .prop_map(|(w, h)| PhotoStandard::custom(w, h).expect("positive size")),
    ]
}

/// A crop rect strictly inside a `w × h` source, built from fractions.
fn arb_source_and_crop() -> impl Strategy<Value = (u32, u32, CropRect)> {
    (2u32..5000, 2u32..5000, 0.0f64..0.9, 0.0f64..0.9, 0.05f64..1.0, 0.05f64..1.0).prop_map(
        |(w, h, fx, fy, fw, fh)| {
            let (sw, sh) = (w as f64, h as f64);
            let x = fx * sw;
            let y = fy * sh;
            let width = (sw - x) * fw;
            let height = (sh - y) * fh;
            (w, h, CropRect::new(x, y, width, height))
        },
    )
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn crop_output_keeps_rect_ratio(
        (w, h, crop) in arb_source_and_crop(),
        target in 1u32..2400,
    ) {
        let plan = plan_crop(w, h, &crop, target).expect("crop inside source");
        prop_assert_eq!(plan.output.width, target);
        let expected = (target as f64 / (crop.width / crop.height)).round().max(1.0);
        prop_assert!((plan.output.height as f64 - expected).abs() <= 1.0);
        prop_assert!(plan.output.height >= 1);
    }

    #[test]
    fn crop_outside_source_is_rejected(
        (w, h, crop) in arb_source_and_crop(),
        push in 1.0f64..500.0,
    ) {
        let shifted = CropRect::new(w as f64 - crop.width + push, crop.y, crop.width, crop.height);
        let is_invalid_region = matches!(
            plan_crop(w, h, &shifted, 600),
            Err(SheetError::InvalidRegion { .. })
        );
        prop_assert!(is_invalid_region);
    }

    #[test]
    fn auto_fit_cols_non_increasing_in_gap(
        standard in arb_standard(),
        sheet in arb_sheet(),
        gap_a in 0.0f64..30.0,
        gap_b in 0.0f64..30.0,
    ) {
        let (small, large) = if gap_a <= gap_b { (gap_a, gap_b) } else { (gap_b, gap_a) };
        let cols = |gap: f64| match compute_layout(&standard, sheet, &LayoutOptions::new().gap_mm(gap)) {
            Ok(l) => l.cols as i64,
            Err(SheetError::DegenerateGrid { cols, .. }) => cols.max(0),
            Err(e) => panic!("unexpected error: {e}"),
        };
        prop_assert!(cols(large) <= cols(small), "gap {small} → {}, gap {large} → {}", cols(small), cols(large));
    }

    #[test]
    fn auto_fit_tiles_are_physical_size(
        standard in arb_standard(),
        sheet in arb_sheet(),
        gap in 0.0f64..10.0,
    ) {
        if let Ok(l) = compute_layout(&standard, sheet, &LayoutOptions::new().gap_mm(gap)) {
            prop_assert!((l.tile.width - mm_to_px(standard.width_mm)).abs() < EPS);
            prop_assert!((l.tile.height - mm_to_px(standard.height_mm)).abs() < EPS);
        }
    }

    #[test]
    fn forced_tile_fits_slot_and_keeps_ratio(
        standard in arb_standard(),
        sheet in arb_sheet(),
        gap in 0.0f64..8.0,
        cols in 1u32..10,
        rows in 1u32..10,
    ) {
        let opts = LayoutOptions::new().gap_mm(gap).force_grid(ForcedGrid::new(cols, rows));
        let Ok(l) = compute_layout(&standard, sheet, &opts) else {
            return Ok(());
        };
        let size = sheet.pixel_size();
        let g = mm_to_px(gap);
        let slot_w = (size.width as f64 - 2.0 * g - (cols - 1) as f64 * g) / cols as f64;
        let slot_h = (size.height as f64 - 2.0 * g - (rows - 1) as f64 * g) / rows as f64;
        prop_assert!(l.tile.width <= slot_w + EPS);
        prop_assert!(l.tile.height <= slot_h + EPS);
        // One side always binds.
        prop_assert!((l.tile.width - slot_w).abs() < EPS || (l.tile.height - slot_h).abs() < EPS);
        let ratio = l.tile.width / l.tile.height;
        prop_assert!((ratio - standard.aspect_ratio()).abs() < 1e-9);
    }

    #[test]
    fn grid_is_always_centered(
        standard in arb_standard(),
        sheet in arb_sheet(),
        gap in 0.0f64..8.0,
        forced in proptest::option::of((1u32..8, 1u32..8)),
    ) {
        let mut opts = LayoutOptions::new().gap_mm(gap);
        if let Some((c, r)) = forced {
            opts = opts.force_grid(ForcedGrid::new(c, r));
        }
        let Ok(l) = compute_layout(&standard, sheet, &opts) else {
            return Ok(());
        };
        let grid_w = l.cols as f64 * l.tile.width + (l.cols - 1) as f64 * l.gap;
        let grid_h = l.rows as f64 * l.tile.height + (l.rows - 1) as f64 * l.gap;
        prop_assert!((l.origin.x - (l.sheet.width as f64 - grid_w) / 2.0).abs() < EPS);
        prop_assert!((l.origin.y - (l.sheet.height as f64 - grid_h) / 2.0).abs() < EPS);
    }

    #[test]
    fn placed_count_respects_limit(
        standard in arb_standard(),
        sheet in arb_sheet(),
        limit in proptest::option::of(0u32..80),
    ) {
        let mut opts = LayoutOptions::new().gap_mm(2.0);
        opts.limit = limit;
        let Ok(l) = compute_layout(&standard, sheet, &opts) else {
            return Ok(());
        };
        let expected = match limit {
            Some(n) if n > 0 => (n as u64).min(l.capacity()),
            _ => l.capacity(),
        };
        prop_assert_eq!(l.count as u64, expected);
        let tiles: Vec<_> = l.tiles().collect();
        prop_assert_eq!(tiles.len() as u64, expected);
        for (i, t) in tiles.iter().enumerate() {
            prop_assert_eq!(t.index as usize, i);
            prop_assert_eq!((t.row, t.col), (i as u32 / l.cols, i as u32 % l.cols));
        }
    }
}
