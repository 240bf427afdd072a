//! Print sheet sizes and the millimeter → pixel conversion.
//!
//! All physical lengths in this crate go through [`mm_to_px`] at the fixed
//! [`DPI`]. Sheet pixel dimensions are the only values snapped to whole
//! pixels here; everything else stays fractional until rasterization.

use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use num_traits::float::FloatCore;

use crate::error::SheetError;
use crate::geometry::Size;

/// Printing resolution in pixels per inch.
pub const DPI: f64 = 300.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert a physical length to pixels at [`DPI`].
pub fn mm_to_px(mm: f64) -> f64 {
    (mm / MM_PER_INCH) * DPI
}

/// Nominal paper size class.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SheetSize {
    /// 4×6 inch photo paper.
    #[default]
    Photo4x6,
    /// ISO A4.
    A4,
}

impl SheetSize {
    /// Portrait dimensions in millimeters as `(width, height)`.
    pub const fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::Photo4x6 => (101.6, 152.4),
            Self::A4 => (210.0, 297.0),
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Photo4x6 => "4x6",
            Self::A4 => "A4",
        }
    }

    /// Base file name for exported sheets, e.g. `passport-sheet-A4`.
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Photo4x6 => "passport-sheet-4x6",
            Self::A4 => "passport-sheet-A4",
        }
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SheetSize {
    type Err = SheetError;

    /// Accepts `4x6`, `photo-4x6`, `4x6-inch` and `a4` (ASCII case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let eq = |name: &str| s.eq_ignore_ascii_case(name);
        if eq("4x6") || eq("photo-4x6") || eq("4x6-inch") {
            Ok(Self::Photo4x6)
        } else if eq("a4") {
            Ok(Self::A4)
        } else {
            Err(SheetError::UnsupportedSheetSize)
        }
    }
}

/// Sheet orientation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl FromStr for Orientation {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("portrait") {
            Ok(Self::Portrait)
        } else if s.eq_ignore_ascii_case("landscape") {
            Ok(Self::Landscape)
        } else {
            Err(SheetError::UnsupportedSheetSize)
        }
    }
}

/// A physical output sheet: size class plus orientation, printed at [`DPI`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SheetSpec {
    pub size: SheetSize,
    pub orientation: Orientation,
}

impl SheetSpec {
    pub const fn new(size: SheetSize, orientation: Orientation) -> Self {
        Self { size, orientation }
    }

    /// Portrait sheet of the given size.
    pub const fn portrait(size: SheetSize) -> Self {
        Self::new(size, Orientation::Portrait)
    }

    /// Landscape sheet of the given size.
    pub const fn landscape(size: SheetSize) -> Self {
        Self::new(size, Orientation::Landscape)
    }

    /// Oriented physical dimensions in millimeters as `(width, height)`.
    ///
    /// This is the page size a PDF writer needs to place the sheet full-bleed.
    pub const fn dimensions_mm(&self) -> (f64, f64) {
        let (w, h) = self.size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Oriented pixel dimensions at [`DPI`], rounded to whole pixels.
    pub fn pixel_size(&self) -> Size {
        let (w, h) = self.size.dimensions_mm();
        let portrait = Size::new(mm_to_px(w).round() as u32, mm_to_px(h).round() as u32);
        match self.orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => portrait.transposed(),
        }
    }
}
