//! Pixel geometry primitives shared by the crop and sheet layouts.
//!
//! Layout math runs in `f64` pixel space so tile positions keep their
//! fractional part until a raster backend snaps them. [`Rect`] and [`Size`]
//! are the snapped, whole-pixel forms.

#[cfg(not(feature = "std"))]
use num_traits::float::FloatCore;

/// Width × height dimensions in whole pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Swap width and height.
    pub const fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Number of pixels covered.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Axis-aligned rectangle in whole-pixel coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Clamp this rect to fit within `(0, 0, max_w, max_h)`.
    /// Width and height are clamped to at least 1.
    pub fn clamp_to(self, max_w: u32, max_h: u32) -> Self {
        let x = self.x.min(max_w.saturating_sub(1));
        let y = self.y.min(max_h.saturating_sub(1));
        let w = self.width.min(max_w.saturating_sub(x)).max(1);
        let h = self.height.min(max_h.saturating_sub(y)).max(1);
        Self {
            x,
            y,
            width: w,
            height: h,
        }
    }

    /// Whether this rect covers the full `source_w × source_h` area.
    pub fn is_full(&self, source_w: u32, source_h: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == source_w && self.height == source_h
    }
}

/// A point in fractional pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dimensions in fractional pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }
}

/// Axis-aligned rectangle in fractional pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width as f64, size.height as f64)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> SizeF {
        SizeF::new(self.width, self.height)
    }

    /// Snap to whole pixels by rounding each edge independently.
    ///
    /// Rounding edges (rather than origin and size) keeps neighbouring
    /// rects that share an edge from overlapping or leaving a seam.
    /// Negative edges clamp to zero.
    pub fn snap(&self) -> Rect {
        let x0 = self.x.round().max(0.0);
        let y0 = self.y.round().max(0.0);
        let x1 = self.right().round().max(x0);
        let y1 = self.bottom().round().max(y0);
        Rect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        }
    }

    /// Whether `other` lies inside this rect, allowing `tolerance` px of overshoot.
    pub fn contains(&self, other: &RectF, tolerance: f64) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.bottom() <= self.bottom() + tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_edges_not_size() {
        // 10.4..20.6 → 10..21, width 11 (rounding the width alone would give 10)
        let r = RectF::new(10.4, 0.0, 10.2, 5.0).snap();
        assert_eq!(r, Rect::new(10, 0, 11, 5));
    }

    #[test]
    fn snap_adjacent_rects_share_edge() {
        let a = RectF::new(0.0, 0.0, 413.386, 10.0).snap();
        let b = RectF::new(413.386, 0.0, 413.386, 10.0).snap();
        assert_eq!(a.x + a.width, b.x);
    }

    #[test]
    fn snap_clamps_negative_origin() {
        let r = RectF::new(-3.0, -1.2, 5.0, 4.0).snap();
        assert_eq!(r, Rect::new(0, 0, 2, 3));
    }

    #[test]
    fn contains_with_tolerance() {
        let outer = RectF::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains(&RectF::new(0.0, 0.0, 100.0, 100.0), 0.0));
        assert!(!outer.contains(&RectF::new(0.0, 0.0, 100.000001, 100.0), 0.0));
        assert!(outer.contains(&RectF::new(0.0, 0.0, 100.000001, 100.0), 1e-6));
        assert!(!outer.contains(&RectF::new(-1.0, 0.0, 10.0, 10.0), 1e-6));
    }

    #[test]
    fn rect_clamp_oversized() {
        let r = Rect::new(90, 90, 50, 50).clamp_to(100, 100);
        assert_eq!(r, Rect::new(90, 90, 10, 10));
    }

    #[test]
    fn rect_clamp_zero_width() {
        let r = Rect::new(0, 0, 0, 0).clamp_to(100, 100);
        assert_eq!(r.width, 1);
        assert_eq!(r.height, 1);
    }

    #[test]
    fn rect_is_full() {
        assert!(Rect::new(0, 0, 100, 100).is_full(100, 100));
        assert!(!Rect::new(1, 0, 99, 100).is_full(100, 100));
    }

    #[test]
    fn size_transposed() {
        assert_eq!(Size::new(1200, 1800).transposed(), Size::new(1800, 1200));
    }
}
