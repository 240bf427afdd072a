//! Passport photo sheet composition: aspect-preserving crops and print-sheet
//! tiling at 300 DPI.
//!
//! The geometry core is pure, `no_std` compatible and allocation free: it
//! decides where every copy of a photo goes on a 4×6 inch or A4 sheet. The
//! pixel work is behind the [`Canvas`](canvas::Canvas) trait, with a
//! software backend in [`raster`].
//!
//! # Modules
//!
//! - [`standard`]: physical photo sizes and the built-in catalog
//! - [`sheet`]: paper sizes, orientation, millimeter → pixel conversion
//! - [`crop`]: crop rectangles and crop output sizing
//! - [`grid`]: sheet tiling (auto-fit and forced grids), centering, limits, caption placement
//! - [`settings`]: print screen choices resolved to layout options
//! - [`canvas`]: the drawing trait and the painters that drive it (`alloc`)
//! - [`raster`]: `image`/`rusttype` backend, crop extraction and sheet composition (`raster`)
//! - [`svg`]: SVG preview of a layout (`svg`)
//! - [`query`]: print settings from a query string (`query`)
//!
//! # Example
//!
//! ```
//! use printsheet::{LayoutOptions, SheetSize, SheetSpec, compute_layout, standard};
//!
//! let uk = standard::find("uk_eu").unwrap();
//! let layout = compute_layout(
//!     &uk,
//!     SheetSpec::portrait(SheetSize::Photo4x6),
//!     &LayoutOptions::new(),
//! )
//! .unwrap();
//!
//! // 413×531 px tiles on a 1200×1800 px sheet
//! assert_eq!((layout.cols, layout.rows), (2, 3));
//! for tile in layout.tiles() {
//!     assert!(tile.rect.right() <= 1200.0 && tile.rect.bottom() <= 1800.0);
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod crop;
mod error;
pub mod geometry;
pub mod grid;
pub mod settings;
pub mod sheet;
pub mod standard;

#[cfg(feature = "alloc")]
pub mod canvas;

#[cfg(feature = "raster")]
pub mod raster;

#[cfg(feature = "svg")]
pub mod svg;

#[cfg(feature = "query")]
pub mod query;

pub use crop::{CropPlan, CropRect, plan_crop};
pub use error::SheetError;
pub use geometry::{PointF, Rect, RectF, Size, SizeF};
pub use grid::{ForcedGrid, GridMode, LayoutOptions, SheetLayout, Tile, compute_layout};
pub use settings::PrintSettings;
pub use sheet::{DPI, Orientation, SheetSize, SheetSpec, mm_to_px};
pub use standard::PhotoStandard;

#[cfg(feature = "raster")]
pub use raster::{CompositeResult, Compositor, compose_sheet, extract_crop};
