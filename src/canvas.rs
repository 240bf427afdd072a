//! Drawing backend abstraction and the painters that drive it.
//!
//! The composition engine needs exactly four raster operations. Any backend
//! that provides them through [`Canvas`] can paint a [`SheetLayout`] or a
//! crop; [`RasterCanvas`](crate::raster::RasterCanvas) is the built-in one.

use alloc::format;
use alloc::string::String;

use crate::crop::CropPlan;
use crate::geometry::{RectF, Size};
use crate::grid::{CaptionPlacement, SheetLayout};

/// Opaque sRGB color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Caption grey, `#aaaaaa`.
    pub const CAPTION: Self = Self::rgb(0xaa, 0xaa, 0xaa);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text anchored by its horizontal center and baseline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextAnchor {
    pub center_x: f64,
    pub baseline_y: f64,
}

/// A 2D raster surface.
///
/// Coordinates are fractional pixels; backends decide how to snap them.
pub trait Canvas {
    /// Source image type accepted by [`draw_image`](Self::draw_image).
    type Image;

    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: RectF, color: Color);

    /// Resample the `src` region of `image` into `dst`.
    fn draw_image(&mut self, image: &Self::Image, src: RectF, dst: RectF);

    /// Stroke the outline of `rect` with a `line_width` px line.
    fn stroke_rect(&mut self, rect: RectF, color: Color, line_width: f64);

    /// Draw a single line of text.
    ///
    /// Backends that cannot render text may do nothing.
    fn fill_text(&mut self, text: &str, anchor: TextAnchor, size_px: f32, color: Color);
}

/// Caption text for a sheet with `count` photos, e.g. `Studio - 12 Photos`.
pub fn caption_text(label: Option<&str>, count: u32) -> String {
    let noun = if count == 1 { "Photo" } else { "Photos" };
    match label {
        Some(label) if !label.is_empty() => format!("{label} - {count} {noun}"),
        _ => format!("{count} {noun}"),
    }
}

/// Paint a white background, every placed tile, cut guides and the caption.
///
/// `unit` is drawn whole into each tile; `unit_size` is its pixel size.
pub fn paint_sheet<C: Canvas>(
    canvas: &mut C,
    layout: &SheetLayout,
    unit: &C::Image,
    unit_size: Size,
    caption_label: Option<&str>,
) {
    canvas.fill_rect(RectF::from_size(layout.sheet), Color::WHITE);

    let src = RectF::from_size(unit_size);
    for tile in layout.tiles() {
        log::trace!("tile {} at ({:.1}, {:.1})", tile.index, tile.rect.x, tile.rect.y);
        canvas.draw_image(unit, src, tile.rect);
        if layout.border {
            canvas.stroke_rect(tile.rect, Color::BLACK, 1.0);
        }
    }

    if let Some(CaptionPlacement {
        center_x,
        baseline_y,
        size_px,
    }) = layout.caption
    {
        let text = caption_text(caption_label, layout.count);
        canvas.fill_text(
            &text,
            TextAnchor {
                center_x,
                baseline_y,
            },
            size_px,
            Color::CAPTION,
        );
    }
}

/// Paint a white background, then the crop's source region over the whole canvas.
pub fn paint_crop<C: Canvas>(canvas: &mut C, plan: &CropPlan, source: &C::Image) {
    let dst = RectF::from_size(plan.output);
    canvas.fill_rect(dst, Color::WHITE);
    canvas.draw_image(source, plan.source, dst);
}
