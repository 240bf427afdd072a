//! Concrete print scenarios through the public geometry API.

use printsheet::grid::CAPTION_MIN_SPACE;
use printsheet::{
    CropRect, ForcedGrid, GridMode, LayoutOptions, Orientation, PrintSettings, SheetSize,
    SheetSpec, Size, compute_layout, mm_to_px, plan_crop, standard,
};

fn uk_eu() -> printsheet::PhotoStandard<'static> {
    standard::find("uk_eu").unwrap()
}

#[test]
fn sheet_pixel_sizes() {
    let cases = [
        (SheetSize::Photo4x6, Orientation::Portrait, Size::new(1200, 1800)),
        (SheetSize::Photo4x6, Orientation::Landscape, Size::new(1800, 1200)),
        (SheetSize::A4, Orientation::Portrait, Size::new(2480, 3508)),
        (SheetSize::A4, Orientation::Landscape, Size::new(3508, 2480)),
    ];
    for (size, orientation, expected) in cases {
        assert_eq!(
            SheetSpec::new(size, orientation).pixel_size(),
            expected,
            "{size} {}",
            orientation.as_str()
        );
    }
}

#[test]
fn uk_eu_a4_auto_fit_with_gap() {
    let l = compute_layout(
        &uk_eu(),
        SheetSpec::portrait(SheetSize::A4),
        &LayoutOptions::new().gap_mm(4.0),
    )
    .unwrap();
    assert_eq!(l.sheet, Size::new(2480, 3508));
    assert_eq!(l.tile.width.round(), 413.0);
    assert_eq!(l.tile.height.round(), 531.0);
    // floor((3508 - 2g + g) / (531.50 + g)) = floor(5.98)
    assert_eq!((l.cols, l.rows), (5, 5));
    assert_eq!(l.count, 25);
    assert_eq!(l.tiles().count(), 25);
}

#[test]
fn uk_eu_a4_forced_6x6_binding_side() {
    let opts = LayoutOptions::new()
        .gap_mm(4.0)
        .force_grid(ForcedGrid::new(6, 6));
    let l = compute_layout(&uk_eu(), SheetSpec::portrait(SheetSize::A4), &opts).unwrap();

    let gap = mm_to_px(4.0);
    let slot_w = (2480.0 - 7.0 * gap) / 6.0;
    let slot_h = (3508.0 - 7.0 * gap) / 6.0;
    assert!((slot_w - 358.2152).abs() < 1e-3);
    assert!((slot_h - 529.5486).abs() < 1e-3);

    // 358.2 / 529.5 = 0.676 is narrower than 35 / 45, so width binds.
    assert_eq!(l.mode, GridMode::ForcedWidthBound);
    assert!((l.tile.width - slot_w).abs() < 1e-9);
    assert!((l.tile.height - slot_w * 45.0 / 35.0).abs() < 1e-9);
    assert!((l.tile.height - 460.5624).abs() < 1e-3);
}

#[test]
fn forced_grid_with_limit_4_fills_row_zero() {
    let opts = LayoutOptions::new()
        .gap_mm(4.0)
        .force_grid(ForcedGrid::new(6, 6))
        .limit(4);
    let l = compute_layout(&uk_eu(), SheetSpec::portrait(SheetSize::A4), &opts).unwrap();
    let placed: Vec<(u32, u32)> = l.tiles().map(|t| (t.row, t.col)).collect();
    assert_eq!(placed, [(0, 0), (0, 1), (0, 2), (0, 3)]);
    // Geometry is the same as the full 36-up sheet.
    let full = compute_layout(
        &uk_eu(),
        SheetSpec::portrait(SheetSize::A4),
        &LayoutOptions::new()
            .gap_mm(4.0)
            .force_grid(ForcedGrid::new(6, 6)),
    )
    .unwrap();
    assert_eq!(l.origin, full.origin);
    assert_eq!(l.tile, full.tile);
}

#[test]
fn default_print_settings_give_36_up_a4() {
    let settings = PrintSettings::default();
    let l = compute_layout(
        &settings.standard,
        settings.sheet(),
        &settings.to_layout_options(),
    )
    .unwrap();
    assert_eq!(l.count, 36);
    assert!(l.border);
}

#[test]
fn preset_4x6_gives_12_up() {
    let settings = PrintSettings {
        paper: SheetSize::Photo4x6,
        ..PrintSettings::default()
    };
    let l = compute_layout(
        &settings.standard,
        settings.sheet(),
        &settings.to_layout_options(),
    )
    .unwrap();
    assert_eq!((l.cols, l.rows, l.count), (3, 4, 12));
}

#[test]
fn caption_needs_more_than_30px() {
    let l = compute_layout(
        &uk_eu(),
        SheetSpec::portrait(SheetSize::A4),
        &LayoutOptions::new().gap_mm(4.0),
    )
    .unwrap();
    assert!(l.space_below() > CAPTION_MIN_SPACE);
    assert!(l.caption.is_some());

    // Full-bleed forced tile.
    let sheet_shaped = printsheet::PhotoStandard::custom(101.6, 152.4).unwrap();
    let l = compute_layout(
        &sheet_shaped,
        SheetSpec::portrait(SheetSize::Photo4x6),
        &LayoutOptions::new().force_grid(ForcedGrid::new(1, 1)),
    )
    .unwrap();
    assert!(l.caption.is_none());
}

#[test]
fn initial_crop_box_round_trip_to_output() {
    // Box drawn on a 500 px wide preview of a 4000×3000 photo.
    let preview = CropRect::centered(500, 375, &uk_eu());
    let natural = preview.scaled(4000.0 / 500.0);
    natural.check_aspect(&uk_eu()).unwrap();
    let plan = plan_crop(4000, 3000, &natural, 600).unwrap();
    assert_eq!(plan.output, Size::new(600, 771));
}

#[test]
fn pdf_page_matches_sheet_aspect() {
    for size in [SheetSize::Photo4x6, SheetSize::A4] {
        for orientation in [Orientation::Portrait, Orientation::Landscape] {
            let spec = SheetSpec::new(size, orientation);
            let (w_mm, h_mm) = spec.dimensions_mm();
            let px = spec.pixel_size();
            let drift = (px.width as f64 / px.height as f64) / (w_mm / h_mm) - 1.0;
            assert!(drift.abs() < 5e-4, "{size}: {drift}");
        }
    }
}
