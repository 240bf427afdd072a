//! Software raster backend on top of the `image` crate.
//!
//! [`RasterCanvas`] implements [`Canvas`] over an [`RgbImage`]; captions are
//! rendered with `rusttype`. [`Compositor`] uses the bundled DejaVu Sans
//! unless told otherwise. The two entry points are [`extract_crop`] and
//! [`compose_sheet`]. Both allocate their own buffers per call, so
//! concurrent calls never share state.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use rusttype::{Font, Scale, point};

use crate::canvas::{Canvas, Color, TextAnchor, paint_crop, paint_sheet};
use crate::crop::{CropRect, plan_crop};
use crate::error::SheetError;
use crate::geometry::{Rect, RectF, Size};
use crate::grid::{LayoutOptions, SheetLayout, compute_layout};
use crate::sheet::{Orientation, SheetSize, SheetSpec};
use crate::standard::PhotoStandard;

/// JPEG quality for extracted crops.
pub const CROP_QUALITY: u8 = 100;

/// JPEG quality for composed sheets.
pub const SHEET_QUALITY: u8 = 95;

const DEFAULT_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// An RGB pixel buffer that accepts [`Canvas`] drawing calls.
///
/// Fractional rects are snapped with [`RectF::snap`] and clipped to the
/// buffer. Image regions are resampled with Lanczos3.
pub struct RasterCanvas<'f> {
    image: RgbImage,
    font: Option<&'f Font<'f>>,
}

impl<'f> RasterCanvas<'f> {
    /// A black buffer of the given size with no font.
    pub fn new(size: Size) -> Self {
        Self {
            image: RgbImage::new(size.width, size.height),
            font: None,
        }
    }

    /// Render text with `font`. Without one, [`Canvas::fill_text`] is a no-op.
    pub fn with_font(mut self, font: &'f Font<'f>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn place(&mut self, region: &RgbImage, dst: Rect) {
        imageops::replace(&mut self.image, region, dst.x as i64, dst.y as i64);
    }

    fn fill_pixels(&mut self, rect: Rect, color: Color) {
        let (w, h) = self.image.dimensions();
        let pixel = Rgb([color.r, color.g, color.b]);
        for y in rect.y..rect.y.saturating_add(rect.height).min(h) {
            for x in rect.x..rect.x.saturating_add(rect.width).min(w) {
                self.image.put_pixel(x, y, pixel);
            }
        }
    }
}

impl fmt::Debug for RasterCanvas<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterCanvas")
            .field("size", &self.image.dimensions())
            .field("font", &self.font.is_some())
            .finish()
    }
}

impl Canvas for RasterCanvas<'_> {
    type Image = RgbImage;

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        self.fill_pixels(rect.snap(), color);
    }

    fn draw_image(&mut self, image: &RgbImage, src: RectF, dst: RectF) {
        let dst = dst.snap();
        if let Some(region) = resample(image, src, Size::new(dst.width, dst.height)) {
            self.place(&region, dst);
        }
    }

    /// Strokes on the outermost pixels of `rect`, so the guide never
    /// spills into a neighbouring gap.
    fn stroke_rect(&mut self, rect: RectF, color: Color, line_width: f64) {
        let r = rect.snap();
        if r.width == 0 || r.height == 0 {
            return;
        }
        let lw = (line_width.round().max(1.0) as u32).min(r.width).min(r.height);
        let bottom = r.y + r.height - lw;
        let right = r.x + r.width - lw;
        self.fill_pixels(Rect::new(r.x, r.y, r.width, lw), color);
        self.fill_pixels(Rect::new(r.x, bottom, r.width, lw), color);
        self.fill_pixels(Rect::new(r.x, r.y, lw, r.height), color);
        self.fill_pixels(Rect::new(right, r.y, lw, r.height), color);
    }

    fn fill_text(&mut self, text: &str, anchor: TextAnchor, size_px: f32, color: Color) {
        let Some(font) = self.font else {
            log::trace!("no font loaded, skipping text {text:?}");
            return;
        };
        let scale = Scale::uniform(size_px);
        let advance = font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let origin = point(
            anchor.center_x as f32 - advance / 2.0,
            anchor.baseline_y as f32,
        );

        let (w, h) = self.image.dimensions();
        let image = &mut self.image;
        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= w as i32 || py >= h as i32 {
                    return;
                }
                blend(image.get_pixel_mut(px as u32, py as u32), color, coverage);
            });
        }
    }
}

/// Paints repeated copies of one image, resampling once per distinct
/// source region and tile size.
///
/// Only valid while every draw passes the same image.
struct TileCanvas<'c, 'f> {
    canvas: &'c mut RasterCanvas<'f>,
    scaled: Vec<(RectF, Size, RgbImage)>,
}

impl<'c, 'f> TileCanvas<'c, 'f> {
    fn new(canvas: &'c mut RasterCanvas<'f>) -> Self {
        Self {
            canvas,
            scaled: Vec::new(),
        }
    }
}

impl Canvas for TileCanvas<'_, '_> {
    type Image = RgbImage;

    fn fill_rect(&mut self, rect: RectF, color: Color) {
        self.canvas.fill_rect(rect, color);
    }

    fn draw_image(&mut self, image: &RgbImage, src: RectF, dst: RectF) {
        let dst = dst.snap();
        let size = Size::new(dst.width, dst.height);
        let cached = self.scaled.iter().position(|(s, z, _)| *s == src && *z == size);
        let index = match cached {
            Some(index) => index,
            None => {
                let Some(region) = resample(image, src, size) else {
                    return;
                };
                log::trace!("resampled tile at {}x{}", size.width, size.height);
                self.scaled.push((src, size, region.into_owned()));
                self.scaled.len() - 1
            }
        };
        self.canvas.place(&self.scaled[index].2, dst);
    }

    fn stroke_rect(&mut self, rect: RectF, color: Color, line_width: f64) {
        self.canvas.stroke_rect(rect, color, line_width);
    }

    fn fill_text(&mut self, text: &str, anchor: TextAnchor, size_px: f32, color: Color) {
        self.canvas.fill_text(text, anchor, size_px, color);
    }
}

/// Resample the `src` region of `image` to exactly `size`.
///
/// Whole-pixel regions are cut out and scaled directly. A fractional region
/// is cut out with its enclosing pixels, scaled by the region's own factor,
/// and then trimmed, so the sub-pixel origin and ratio survive. Returns
/// `None` when either side is empty.
fn resample(image: &RgbImage, src: RectF, size: Size) -> Option<Cow<'_, RgbImage>> {
    let (iw, ih) = image.dimensions();
    if size.width == 0 || size.height == 0 || iw == 0 || ih == 0 {
        return None;
    }
    let whole = [src.x, src.y, src.width, src.height]
        .iter()
        .all(|v| v.fract() == 0.0);
    if whole || !(src.width > 0.0 && src.height > 0.0) {
        let r = src.snap().clamp_to(iw, ih);
        if r.width == 0 || r.height == 0 {
            return None;
        }
        let region = if r.is_full(iw, ih) {
            Cow::Borrowed(image)
        } else {
            Cow::Owned(imageops::crop_imm(image, r.x, r.y, r.width, r.height).to_image())
        };
        if region.dimensions() == (size.width, size.height) {
            return Some(region);
        }
        let scaled = imageops::resize(&*region, size.width, size.height, FilterType::Lanczos3);
        return Some(Cow::Owned(scaled));
    }

    let x0 = (src.x.floor().max(0.0) as u32).min(iw - 1);
    let y0 = (src.y.floor().max(0.0) as u32).min(ih - 1);
    let x1 = ((src.x + src.width).ceil().max(0.0) as u32).clamp(x0 + 1, iw);
    let y1 = ((src.y + src.height).ceil().max(0.0) as u32).clamp(y0 + 1, ih);
    let (bw, bh) = (x1 - x0, y1 - y0);
    let sx = size.width as f64 / src.width;
    let sy = size.height as f64 / src.height;
    let rw = ((bw as f64 * sx).round() as u32).max(size.width);
    let rh = ((bh as f64 * sy).round() as u32).max(size.height);

    let enclosing = imageops::crop_imm(image, x0, y0, bw, bh).to_image();
    let scaled = imageops::resize(&enclosing, rw, rh, FilterType::Lanczos3);
    let ox = (((src.x - x0 as f64) * sx).round().max(0.0) as u32).min(rw - size.width);
    let oy = (((src.y - y0 as f64) * sy).round().max(0.0) as u32).min(rh - size.height);
    Some(Cow::Owned(
        imageops::crop_imm(&scaled, ox, oy, size.width, size.height).to_image(),
    ))
}

fn blend(pixel: &mut Rgb<u8>, color: Color, coverage: f32) {
    let a = coverage.clamp(0.0, 1.0);
    let mix = |dst: u8, src: u8| (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8;
    *pixel = Rgb([
        mix(pixel[0], color.r),
        mix(pixel[1], color.g),
        mix(pixel[2], color.b),
    ]);
}

/// The bundled caption font, DejaVu Sans.
pub fn default_font() -> Option<Font<'static>> {
    let font = Font::try_from_bytes(DEFAULT_FONT);
    if font.is_none() {
        log::warn!("bundled caption font could not be parsed, captions disabled");
    }
    font
}

/// Parse a TrueType/OpenType font for captions.
///
/// Returns `None` (and logs) on unparseable data; captions are then skipped.
pub fn load_font(bytes: Vec<u8>) -> Option<Font<'static>> {
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        log::warn!("caption font could not be parsed, captions disabled");
    }
    font
}

/// Decode an encoded image (JPEG, PNG).
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, SheetError> {
    Ok(image::load_from_memory(bytes)?)
}

/// Encode as baseline JPEG. `quality` is clamped to `1..=100`.
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, SheetError> {
    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    image.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Convert to 8-bit RGB, compositing any transparency over white.
pub fn flatten_on_white(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }
    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let mut out = Rgb([255, 255, 255]);
        let p = rgba.get_pixel(x, y);
        blend(&mut out, Color::rgb(p[0], p[1], p[2]), p[3] as f32 / 255.0);
        out
    })
}

/// Crop `source` to `crop` and resample it to `target_width` wide.
///
/// The output keeps the crop rect's own aspect ratio.
pub fn crop_to_raster(
    source: &DynamicImage,
    crop: &CropRect,
    target_width: u32,
) -> Result<RgbImage, SheetError> {
    let plan = plan_crop(source.width(), source.height(), crop, target_width)?;
    let source = flatten_on_white(source);
    let mut canvas = RasterCanvas::new(plan.output);
    paint_crop(&mut canvas, &plan, &source);
    Ok(canvas.into_image())
}

/// Crop, resample and encode at [`CROP_QUALITY`].
pub fn extract_crop(
    source: &DynamicImage,
    crop: &CropRect,
    target_width: u32,
) -> Result<Vec<u8>, SheetError> {
    let image = crop_to_raster(source, crop, target_width)?;
    encode_jpeg(&image, CROP_QUALITY)
}

/// An encoded sheet and the geometry it was painted from.
#[derive(Clone, Debug)]
pub struct CompositeResult {
    /// JPEG bytes.
    pub bytes: Vec<u8>,
    /// Tiles placed.
    pub count: u32,
    pub layout: SheetLayout,
}

/// Sheet compositor with caption and encoder settings.
///
/// # Example
///
/// ```
/// use image::{DynamicImage, RgbImage};
/// use printsheet::grid::LayoutOptions;
/// use printsheet::raster::Compositor;
/// use printsheet::sheet::{Orientation, SheetSize};
/// use printsheet::standard::UK_EU;
///
/// let unit = DynamicImage::ImageRgb8(RgbImage::new(35, 45));
/// let result = Compositor::new()
///     .caption_label("Studio")
///     .compose(&unit, &UK_EU, SheetSize::Photo4x6, Orientation::Portrait, &LayoutOptions::new())
///     .unwrap();
/// assert_eq!(result.count, result.layout.capacity() as u32);
/// ```
#[derive(Clone)]
pub struct Compositor {
    font: Option<Font<'static>>,
    caption_label: Option<String>,
    quality: u8,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("font", &self.font.is_some())
            .field("caption_label", &self.caption_label)
            .field("quality", &self.quality)
            .finish()
    }
}

impl Compositor {
    /// Bundled caption font, no label, [`SHEET_QUALITY`].
    pub fn new() -> Self {
        Self {
            font: default_font(),
            caption_label: None,
            quality: SHEET_QUALITY,
        }
    }

    /// Font for the caption, replacing the bundled one.
    pub fn font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    /// Skip caption text entirely. The layout still reserves its placement.
    pub fn without_font(mut self) -> Self {
        self.font = None;
        self
    }

    /// Prefix for the caption, e.g. `Studio - 12 Photos`.
    pub fn caption_label(mut self, label: impl Into<String>) -> Self {
        self.caption_label = Some(label.into());
        self
    }

    /// JPEG quality, clamped to `1..=100`.
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = quality.clamp(1, 100);
        self
    }

    /// Lay out and paint the sheet without encoding.
    pub fn render(
        &self,
        unit: &RgbImage,
        standard: &PhotoStandard<'_>,
        sheet: SheetSpec,
        options: &LayoutOptions,
    ) -> Result<(RgbImage, SheetLayout), SheetError> {
        let layout = compute_layout(standard, sheet, options)?;
        let mut canvas = RasterCanvas::new(layout.sheet);
        if let Some(font) = &self.font {
            canvas = canvas.with_font(font);
        }
        let unit_size = Size::new(unit.width(), unit.height());
        paint_sheet(
            &mut TileCanvas::new(&mut canvas),
            &layout,
            unit,
            unit_size,
            self.caption_label.as_deref(),
        );
        Ok((canvas.into_image(), layout))
    }

    /// Tile `unit` across a sheet and encode it.
    pub fn compose(
        &self,
        unit: &DynamicImage,
        standard: &PhotoStandard<'_>,
        size: SheetSize,
        orientation: Orientation,
        options: &LayoutOptions,
    ) -> Result<CompositeResult, SheetError> {
        let unit = flatten_on_white(unit);
        let (image, layout) = self.render(&unit, standard, SheetSpec::new(size, orientation), options)?;
        let bytes = encode_jpeg(&image, self.quality)?;
        log::debug!(
            "composed {} {} sheet: {} tiles, {} bytes",
            size,
            orientation.as_str(),
            layout.count,
            bytes.len()
        );
        Ok(CompositeResult {
            bytes,
            count: layout.count,
            layout,
        })
    }
}

/// Compose with default [`Compositor`] settings.
pub fn compose_sheet(
    unit: &DynamicImage,
    standard: &PhotoStandard<'_>,
    size: SheetSize,
    orientation: Orientation,
    options: &LayoutOptions,
) -> Result<CompositeResult, SheetError> {
    Compositor::new().compose(unit, standard, size, orientation, options)
}
