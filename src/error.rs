//! Error type for crop and sheet composition.

use thiserror::Error;

/// Crop or sheet composition failure.
///
/// Every variant except [`CodecFailure`](Self::CodecFailure) is a local
/// validation failure raised before any pixel is written.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// Crop rectangle is degenerate or reaches outside the source image.
    #[error(
        "crop region ({x}, {y}) {width}x{height} is not inside the {source_width}x{source_height} source"
    )]
    InvalidRegion {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        source_width: u32,
        source_height: u32,
    },

    /// Crop output width is zero.
    #[error("crop target width must be at least one pixel")]
    ZeroTargetWidth,

    /// Crop rectangle ratio drifted from the photo standard it was built for.
    #[error("crop aspect ratio {actual:.4} does not match the standard's {expected:.4}")]
    AspectMismatch { expected: f64, actual: f64 },

    /// Sheet size name is not one of the supported paper sizes.
    #[error("unsupported sheet size (expected 4x6 or A4)")]
    UnsupportedSheetSize,

    /// Photo standard has a non-positive or non-finite dimension.
    #[error("photo standard must have positive dimensions, got {width_mm}x{height_mm} mm")]
    InvalidStandard { width_mm: f64, height_mm: f64 },

    /// Gap is negative or not finite.
    #[error("gap must be a finite, non-negative length, got {gap_mm} mm")]
    InvalidGap { gap_mm: f64 },

    /// Layout leaves no usable column or row.
    #[error("layout has no usable cells ({cols} columns x {rows} rows)")]
    DegenerateGrid { cols: i64, rows: i64 },

    /// Grid has more cells than a sheet can count.
    #[error("layout has too many cells ({cols} columns x {rows} rows)")]
    TooManyCells { cols: i64, rows: i64 },

    /// Image decoding or encoding failed.
    #[cfg(feature = "raster")]
    #[error("image codec failure: {0}")]
    CodecFailure(#[from] image::ImageError),
}
