//! Sheet tiling: how many copies of a photo fit a print sheet, and where.
//!
//! Computes grid dimensions, tile size, spacing and centering from a photo
//! standard, a sheet, and [`LayoutOptions`]. Pure geometry: no pixel
//! operations, no allocations, `no_std` compatible. The result is a
//! [`SheetLayout`], which a [`Canvas`](crate::canvas::Canvas) backend paints.
//!
//! Two sizing modes:
//!
//! - **Auto-fit**: tiles print at the standard's exact physical size and as
//!   many columns and rows as fit are used.
//! - **Forced grid**: the caller fixes columns and rows; tiles scale to the
//!   largest size of the standard's ratio that fits each slot.
//!
//! # Example
//!
//! ```
//! use printsheet::grid::{LayoutOptions, compute_layout};
//! use printsheet::sheet::{SheetSize, SheetSpec};
//! use printsheet::standard::UK_EU;
//!
//! let layout = compute_layout(
//!     &UK_EU,
//!     SheetSpec::portrait(SheetSize::A4),
//!     &LayoutOptions::new().gap_mm(4.0),
//! )
//! .unwrap();
//!
//! assert_eq!((layout.cols, layout.rows), (5, 5));
//! assert_eq!(layout.count, 25);
//! ```

#[cfg(not(feature = "std"))]
use num_traits::float::FloatCore;

use crate::error::SheetError;
use crate::geometry::{PointF, RectF, Size, SizeF};
use crate::sheet::{SheetSize, SheetSpec, mm_to_px};
use crate::standard::PhotoStandard;

/// Minimum free space (px) below the grid needed to print a caption.
pub const CAPTION_MIN_SPACE: f64 = 30.0;

/// Caption baseline distance (px) from the bottom sheet edge.
pub const CAPTION_BASELINE_INSET: f64 = 15.0;

/// Caption font size in pixels.
pub const CAPTION_FONT_PX: f32 = 24.0;

/// Gap used when cut guides are requested.
pub const CUT_GUIDE_GAP_MM: f64 = 4.0;

/// Explicit column and row counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForcedGrid {
    pub cols: u32,
    pub rows: u32,
}

impl ForcedGrid {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// The standard grid for a photo standard on a sheet size, if one exists.
    ///
    /// Only the two passport sizes have presets: 36 per A4, 12 per 4×6.
    pub fn preset(standard_id: &str, size: SheetSize) -> Option<Self> {
        if standard_id != "us_2x2" && standard_id != "uk_eu" {
            return None;
        }
        Some(match size {
            SheetSize::A4 => Self::new(6, 6),
            SheetSize::Photo4x6 => Self::new(3, 4),
        })
    }

    /// Number of cells.
    pub const fn cells(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }
}

/// Layout choices for one sheet.
///
/// # Example
///
/// ```
/// use printsheet::grid::{ForcedGrid, LayoutOptions};
///
/// let options = LayoutOptions::new()
///     .gap_mm(4.0)
///     .border(true)
///     .force_grid(ForcedGrid::new(6, 6))
///     .limit(4);
/// assert_eq!(options.limit, Some(4));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutOptions {
    /// Spacing between tiles and around the sheet edge, in millimeters.
    pub gap_mm: f64,
    /// Stroke a 1 px cut guide around every tile.
    pub border: bool,
    /// Fixed grid instead of auto-fit.
    pub force_grid: Option<ForcedGrid>,
    /// Upper bound on tiles placed. `Some(0)` means no bound.
    pub limit: Option<u32>,
    /// Print a tile-count caption when there is room below the grid.
    pub caption: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutOptions {
    /// No gap, no borders, auto-fit, no limit, caption on.
    pub const fn new() -> Self {
        Self {
            gap_mm: 0.0,
            border: false,
            force_grid: None,
            limit: None,
            caption: true,
        }
    }

    /// Set gap and margin in millimeters.
    pub fn gap_mm(mut self, gap_mm: f64) -> Self {
        self.gap_mm = gap_mm;
        self
    }

    /// Enable or disable cut-guide borders.
    pub fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    /// Use a fixed grid.
    pub fn force_grid(mut self, grid: ForcedGrid) -> Self {
        self.force_grid = Some(grid);
        self
    }

    /// Cap the number of tiles.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enable or disable the caption.
    pub fn caption(mut self, caption: bool) -> Self {
        self.caption = caption;
        self
    }

    /// Cut guides on: 4 mm gap plus borders. Off: no gap, no borders.
    pub fn cut_guides(self, enabled: bool) -> Self {
        let gap = if enabled { CUT_GUIDE_GAP_MM } else { 0.0 };
        self.gap_mm(gap).border(enabled)
    }

    fn effective_limit(&self) -> Option<u32> {
        self.limit.filter(|&n| n > 0)
    }
}

/// Which sizing rule produced a layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GridMode {
    /// Physical tile size, as many cells as fit.
    AutoFit,
    /// Caller-fixed cells, tile fit to the slot by height.
    ForcedHeightBound,
    /// Caller-fixed cells, tile fit to the slot by width.
    ForcedWidthBound,
}

impl GridMode {
    pub const fn is_forced(self) -> bool {
        !matches!(self, Self::AutoFit)
    }
}

/// One placed copy of the photo.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Zero-based placement order (row-major).
    pub index: u32,
    pub row: u32,
    pub col: u32,
    /// Bounds on the sheet in fractional pixels.
    pub rect: RectF,
}

/// Where the tile-count caption goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CaptionPlacement {
    /// Horizontal center of the text.
    pub center_x: f64,
    /// Text baseline.
    pub baseline_y: f64,
    /// Font size in pixels.
    pub size_px: f32,
}

/// Complete geometry for one sheet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SheetLayout {
    /// Sheet dimensions in pixels.
    pub sheet: Size,
    pub mode: GridMode,
    pub cols: u32,
    pub rows: u32,
    /// Size of every tile.
    pub tile: SizeF,
    /// Spacing between tiles.
    pub gap: f64,
    /// Minimum distance from the sheet edge.
    pub margin: f64,
    /// Top-left corner of the grid.
    pub origin: PointF,
    /// Extent of the full grid, including inner gaps.
    pub grid: SizeF,
    /// Tiles actually placed: `min(limit, cols × rows)`.
    pub count: u32,
    /// Whether cut guides are drawn.
    pub border: bool,
    /// Caption position, when enabled and there is room.
    pub caption: Option<CaptionPlacement>,
}

impl SheetLayout {
    /// Number of cells in the grid.
    pub const fn capacity(&self) -> u64 {
        self.cols as u64 * self.rows as u64
    }

    /// Bounds of the cell at `(row, col)`, whether or not a tile is placed there.
    pub fn cell(&self, row: u32, col: u32) -> RectF {
        RectF::new(
            self.origin.x + col as f64 * (self.tile.width + self.gap),
            self.origin.y + row as f64 * (self.tile.height + self.gap),
            self.tile.width,
            self.tile.height,
        )
    }

    /// Placed tiles in row-major order, stopping at [`count`](Self::count).
    pub fn tiles(&self) -> Tiles<'_> {
        Tiles {
            layout: self,
            next: 0,
        }
    }

    /// Bounds of the full grid.
    pub fn grid_rect(&self) -> RectF {
        RectF::new(self.origin.x, self.origin.y, self.grid.width, self.grid.height)
    }

    /// Free space between the bottom of the grid and the sheet edge.
    pub fn space_below(&self) -> f64 {
        self.sheet.height as f64 - (self.origin.y + self.grid.height)
    }
}

/// Iterator over the placed tiles of a [`SheetLayout`].
#[derive(Clone, Debug)]
pub struct Tiles<'a> {
    layout: &'a SheetLayout,
    next: u32,
}

impl Iterator for Tiles<'_> {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.layout.count {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let row = index / self.layout.cols;
        let col = index % self.layout.cols;
        Some(Tile {
            index,
            row,
            col,
            rect: self.layout.cell(row, col),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.layout.count - self.next) as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tiles<'_> {}

/// Number of `item`-sized cells separated by `gap` that fit in `available`.
///
/// The trailing cell needs no gap, so one gap is added to the available
/// span before dividing by the cell pitch.
pub fn fit_count(available: f64, item: f64, gap: f64) -> i64 {
    ((available + gap) / (item + gap)).floor() as i64
}

/// Size a tile of `aspect` (width / height) to fill a `slot`.
///
/// Returns the tile size and whether height was the binding constraint.
pub fn fit_to_slot(slot: SizeF, aspect: f64) -> (SizeF, bool) {
    if slot.width / slot.height > aspect {
        (SizeF::new(slot.height * aspect, slot.height), true)
    } else {
        (SizeF::new(slot.width, slot.width / aspect), false)
    }
}

/// Compute the tiling of `standard` on `sheet`.
pub fn compute_layout(
    standard: &PhotoStandard<'_>,
    sheet: SheetSpec,
    options: &LayoutOptions,
) -> Result<SheetLayout, SheetError> {
    if !options.gap_mm.is_finite() || options.gap_mm < 0.0 {
        return Err(SheetError::InvalidGap {
            gap_mm: options.gap_mm,
        });
    }
    let sheet_px = sheet.pixel_size();
    let (sheet_w, sheet_h) = (sheet_px.width as f64, sheet_px.height as f64);
    let gap = mm_to_px(options.gap_mm);
    let margin = gap;

    let (mode, cols, rows, tile) = match options.force_grid {
        Some(grid) => {
            if grid.cols == 0 || grid.rows == 0 {
                return Err(SheetError::DegenerateGrid {
                    cols: grid.cols as i64,
                    rows: grid.rows as i64,
                });
            }
            let available_w = sheet_w - 2.0 * margin - (grid.cols - 1) as f64 * gap;
            let available_h = sheet_h - 2.0 * margin - (grid.rows - 1) as f64 * gap;
            let slot = SizeF::new(available_w / grid.cols as f64, available_h / grid.rows as f64);
            if !(slot.width > 0.0 && slot.height > 0.0) {
                return Err(SheetError::DegenerateGrid {
                    cols: grid.cols as i64,
                    rows: grid.rows as i64,
                });
            }
            let (tile, height_bound) = fit_to_slot(slot, standard.aspect_ratio());
            let mode = if height_bound {
                GridMode::ForcedHeightBound
            } else {
                GridMode::ForcedWidthBound
            };
            (mode, grid.cols, grid.rows, tile)
        }
        None => {
            let tile = SizeF::new(mm_to_px(standard.width_mm), mm_to_px(standard.height_mm));
            let cols = fit_count(sheet_w - 2.0 * margin, tile.width, gap);
            let rows = fit_count(sheet_h - 2.0 * margin, tile.height, gap);
            if cols < 1 || rows < 1 {
                return Err(SheetError::DegenerateGrid { cols, rows });
            }
            let (Ok(c), Ok(r)) = (u32::try_from(cols), u32::try_from(rows)) else {
                return Err(SheetError::TooManyCells { cols, rows });
            };
            (GridMode::AutoFit, c, r, tile)
        }
    };

    let capacity = cols as u64 * rows as u64;
    if capacity > u32::MAX as u64 {
        return Err(SheetError::TooManyCells {
            cols: cols as i64,
            rows: rows as i64,
        });
    }

    let grid = SizeF::new(
        cols as f64 * tile.width + (cols - 1) as f64 * gap,
        rows as f64 * tile.height + (rows - 1) as f64 * gap,
    );
    let origin = PointF::new((sheet_w - grid.width) / 2.0, (sheet_h - grid.height) / 2.0);

    // capacity fits in u32, so the cast is exact.
    let count = match options.effective_limit() {
        Some(limit) => (limit as u64).min(capacity) as u32,
        None => capacity as u32,
    };
    if mode.is_forced() && (count as u64) < capacity {
        log::debug!("limit leaves {} of {} forced cells empty", capacity - count as u64, capacity);
    }

    let space_below = sheet_h - (origin.y + grid.height);
    let caption = (options.caption && space_below > CAPTION_MIN_SPACE).then(|| CaptionPlacement {
        center_x: sheet_w / 2.0,
        baseline_y: sheet_h - CAPTION_BASELINE_INSET,
        size_px: CAPTION_FONT_PX,
    });

    log::debug!(
        "{:?} {}x{} of {:.1}x{:.1}px on {}x{} ({} placed, gap {:.1}px)",
        mode,
        cols,
        rows,
        tile.width,
        tile.height,
        sheet_px.width,
        sheet_px.height,
        count,
        gap
    );

    Ok(SheetLayout {
        sheet: sheet_px,
        mode,
        cols,
        rows,
        tile,
        gap,
        margin,
        origin,
        grid,
        count,
        border: options.border,
        caption,
    })
}
