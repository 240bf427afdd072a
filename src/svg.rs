//! SVG preview of a sheet layout.
//!
//! Draws the sheet scaled into a fixed panel: placed tiles, the grid cells
//! left empty by a limit, and the caption line, with a header label and a
//! one-line annotation of the grid numbers. Useful for eyeballing a layout
//! without rasterizing the photo.
//!
//! # Example
//!
//! ```
//! use printsheet::grid::{ForcedGrid, LayoutOptions, compute_layout};
//! use printsheet::sheet::{SheetSize, SheetSpec};
//! use printsheet::standard::UK_EU;
//! use printsheet::svg::render_sheet_svg;
//!
//! let options = LayoutOptions::new()
//!     .cut_guides(true)
//!     .force_grid(ForcedGrid::new(6, 6))
//!     .limit(4);
//! let layout = compute_layout(&UK_EU, SheetSpec::portrait(SheetSize::A4), &options).unwrap();
//!
//! let svg = render_sheet_svg(&layout, Some("UK / EU on A4"));
//! assert_eq!(svg.matches(r#"class="tile"#).count(), 4);
//! ```

use crate::canvas::caption_text;
use crate::geometry::RectF;
use crate::grid::{GridMode, SheetLayout};

/// Maximum pixel width of the sheet panel.
const MAX_PANEL_W: f64 = 360.0;
/// Maximum pixel height of the sheet panel.
const MAX_PANEL_H: f64 = 510.0;
/// Horizontal margin.
const MARGIN_X: f64 = 40.0;
/// Top margin.
const MARGIN_TOP: f64 = 30.0;
/// Height of label text area above the panel.
const LABEL_H: f64 = 22.0;
/// Height of annotation area below the panel.
const ANNOTATION_H: f64 = 30.0;

/// Render a complete SVG document previewing `layout`.
///
/// `label` is the header text; when `None` the sheet's pixel size is used.
pub fn render_sheet_svg(layout: &SheetLayout, label: Option<&str>) -> String {
    let (sw, sh, scale) = scale_to_fit(layout.sheet.width as f64, layout.sheet.height as f64);
    let total_w = MAX_PANEL_W + 2.0 * MARGIN_X;
    let total_h = MARGIN_TOP + LABEL_H + MAX_PANEL_H + ANNOTATION_H + MARGIN_TOP;
    let center_x = total_w / 2.0;
    let panel_x = center_x - sw / 2.0;
    let panel_y = MARGIN_TOP + LABEL_H;

    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');

    // Style, light/dark via prefers-color-scheme
    svg.push_str(
        r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .caption { font-size: 9px; fill: #aaa; }
  .sheet { fill: #fff; stroke: #999; stroke-width: 1; }
  .tile { fill: #6ba3d6; }
  .tile.cut { stroke: #000; stroke-width: 0.75; }
  .empty { fill: none; stroke: #b8d4ee; stroke-width: 1; stroke-dasharray: 4,2; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .sheet { fill: #2d2d2d; stroke: #555; }
    .tile { fill: #3a72a4; }
    .tile.cut { stroke: #ddd; }
    .empty { stroke: #4a7a9e; }
  }
</style>
"##,
    );

    let header = match label {
        Some(label) => String::from(label),
        None => format!("{}x{} px sheet", layout.sheet.width, layout.sheet.height),
    };
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        center_x,
        MARGIN_TOP + 14.0,
        escape_xml(&header)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="sheet"/>"#,
        panel_x, panel_y, sw, sh
    ));
    svg.push('\n');

    let to_panel = |r: RectF| {
        (
            panel_x + r.x * scale,
            panel_y + r.y * scale,
            r.width * scale,
            r.height * scale,
        )
    };

    let tile_class = if layout.border { "tile cut" } else { "tile" };
    for tile in layout.tiles() {
        let (x, y, w, h) = to_panel(tile.rect);
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="{tile_class}"/>"#
        ));
        svg.push('\n');
    }

    // Cells a limit left empty
    for index in layout.count as u64..layout.capacity() {
        let (row, col) = ((index / layout.cols as u64) as u32, (index % layout.cols as u64) as u32);
        let (x, y, w, h) = to_panel(layout.cell(row, col));
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" class="empty"/>"#
        ));
        svg.push('\n');
    }

    if let Some(caption) = layout.caption {
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="caption" text-anchor="middle">{}</text>"#,
            panel_x + caption.center_x * scale,
            panel_y + caption.baseline_y * scale,
            escape_xml(&caption_text(None, layout.count))
        ));
        svg.push('\n');
    }

    let mode = match layout.mode {
        GridMode::AutoFit => "auto-fit",
        GridMode::ForcedHeightBound => "forced, height-bound",
        GridMode::ForcedWidthBound => "forced, width-bound",
    };
    let annotation = format!(
        "{}x{} {} | {} of {} placed | tile {:.1}x{:.1} px",
        layout.cols,
        layout.rows,
        mode,
        layout.count,
        layout.capacity(),
        layout.tile.width,
        layout.tile.height
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
        center_x,
        panel_y + sh + 16.0,
        escape_xml(&annotation)
    ));
    svg.push('\n');

    svg.push_str("</svg>\n");
    svg
}

/// Scale `w × h` into the panel, returning scaled size and factor.
fn scale_to_fit(w: f64, h: f64) -> (f64, f64, f64) {
    if w == 0.0 || h == 0.0 {
        return (1.0, 1.0, 1.0);
    }
    let scale = (MAX_PANEL_W / w).min(MAX_PANEL_H / h);
    (w * scale, h * scale, scale)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
