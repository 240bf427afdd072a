//! Crop rectangles and crop output sizing.
//!
//! A [`CropRect`] lives in the source image's native pixel space. It is
//! fractional because callers usually derive it by scaling a box drawn on a
//! downsized preview. [`plan_crop`] validates a rect against its source and
//! computes the output canvas, preserving the rect's own aspect ratio.
//!
//! # Example
//!
//! ```
//! use printsheet::crop::{CropRect, plan_crop};
//! use printsheet::standard::UK_EU;
//! use printsheet::Size;
//!
//! // Initial crop box for a 1000×1000 photo: 80% tall, 35:45 ratio, centered.
//! let crop = CropRect::centered(1000, 1000, &UK_EU);
//! assert_eq!(crop.height, 800.0);
//!
//! let plan = plan_crop(1000, 1000, &crop, 600).unwrap();
//! assert_eq!(plan.output, Size::new(600, 771));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::float::FloatCore;

use crate::error::SheetError;
use crate::geometry::{RectF, Size};
use crate::standard::PhotoStandard;

/// Output width used when the caller has no preference.
pub const DEFAULT_TARGET_WIDTH: u32 = 600;

/// Fraction of the limiting source dimension covered by [`CropRect::centered`].
pub const INITIAL_COVERAGE: f64 = 0.8;

/// Allowed relative deviation for [`CropRect::check_aspect`].
pub const ASPECT_TOLERANCE: f64 = 0.01;

/// Overshoot past the source edge (in px) still accepted as inside.
///
/// Display → natural scaling routinely lands a hair past the last pixel.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Crop region in source pixel coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box anchored at `(x, y)` whose height follows from `width` and the standard's ratio.
    pub fn for_standard(x: f64, y: f64, width: f64, standard: &PhotoStandard<'_>) -> Self {
        Self::new(x, y, width, width / standard.aspect_ratio())
    }

    /// The starting crop box for a freshly loaded image.
    ///
    /// Takes 80% of the source width; if the resulting height overflows 80%
    /// of the source height, height becomes the limit instead. The box is
    /// centered on both axes.
    pub fn centered(source_w: u32, source_h: u32, standard: &PhotoStandard<'_>) -> Self {
        let (sw, sh) = (source_w as f64, source_h as f64);
        let ratio = standard.aspect_ratio();
        let mut width = sw * INITIAL_COVERAGE;
        let mut height = width / ratio;
        if height > sh * INITIAL_COVERAGE {
            height = sh * INITIAL_COVERAGE;
            width = height * ratio;
        }
        Self::new((sw - width) / 2.0, (sh - height) / 2.0, width, height)
    }

    /// Scale every coordinate, e.g. from preview space into natural pixels.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    pub fn as_rect(&self) -> RectF {
        RectF::new(self.x, self.y, self.width, self.height)
    }

    /// Ensure the rect is non-degenerate and inside a `source_w × source_h` image.
    pub fn validate(&self, source_w: u32, source_h: u32) -> Result<(), SheetError> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        let inside = RectF::new(0.0, 0.0, source_w as f64, source_h as f64)
            .contains(&self.as_rect(), BOUNDS_EPSILON);
        if !finite || self.width <= 0.0 || self.height <= 0.0 || !inside {
            return Err(SheetError::InvalidRegion {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                source_width: source_w,
                source_height: source_h,
            });
        }
        Ok(())
    }

    /// Reject a rect whose ratio drifted more than [`ASPECT_TOLERANCE`] from `standard`.
    ///
    /// [`plan_crop`] never calls this; callers opt in when the rect comes
    /// from somewhere that might not have kept the ratio.
    pub fn check_aspect(&self, standard: &PhotoStandard<'_>) -> Result<(), SheetError> {
        let expected = standard.aspect_ratio();
        let actual = self.aspect_ratio();
        let drift = ((actual - expected) / expected).abs();
        if !(drift <= ASPECT_TOLERANCE) {
            log::warn!(
                "crop {}x{} drifted {:.2}% from {} ratio",
                self.width,
                self.height,
                drift * 100.0,
                standard.id
            );
            return Err(SheetError::AspectMismatch { expected, actual });
        }
        Ok(())
    }

    /// Output canvas for `target_width`: height is `target_width / ratio`, rounded, at least 1.
    pub fn output_size(&self, target_width: u32) -> Result<Size, SheetError> {
        if target_width == 0 {
            return Err(SheetError::ZeroTargetWidth);
        }
        let height = (target_width as f64 / self.aspect_ratio()).round().max(1.0);
        Ok(Size::new(target_width, height as u32))
    }
}

/// Validated crop: where to read from and how big the output is.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CropPlan {
    /// Source region, in source pixels.
    pub source: RectF,
    /// Output canvas dimensions.
    pub output: Size,
}

/// Validate `crop` against the source and size the output canvas.
pub fn plan_crop(
    source_w: u32,
    source_h: u32,
    crop: &CropRect,
    target_width: u32,
) -> Result<CropPlan, SheetError> {
    crop.validate(source_w, source_h)?;
    let output = crop.output_size(target_width)?;
    log::debug!(
        "crop ({:.1}, {:.1}) {:.1}x{:.1} of {}x{} -> {}x{}",
        crop.x,
        crop.y,
        crop.width,
        crop.height,
        source_w,
        source_h,
        output.width,
        output.height
    );
    Ok(CropPlan {
        source: crop.as_rect(),
        output,
    })
}
