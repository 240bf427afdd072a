//! Query-string parsing of print settings.
//!
//! Parses strings like `?standard=uk_eu&paper=a4&cut=1&count=4` into
//! [`PrintSettings`], so a sheet request can travel in a URL or a CLI
//! argument.
//!
//! # Example
//!
//! ```
//! use printsheet::grid::ForcedGrid;
//! use printsheet::query;
//!
//! let result = query::parse("standard=us_2x2&paper=4x6&count=6");
//! assert!(result.warnings.is_empty());
//!
//! let options = result.settings.to_layout_options();
//! assert_eq!(options.force_grid, Some(ForcedGrid::new(3, 4)));
//! assert_eq!(options.limit, Some(6));
//! ```
//!
//! # Recognized keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `standard`, `std` | catalog id (`us_2x2`, `uk_eu`, `in_pan`, `in_stamp`) |
//! | `paper`, `size`, `sheet` | `4x6` or `a4` |
//! | `orientation`, `o` | `portrait` or `landscape` |
//! | `cut`, `cutguides`, `border` | boolean |
//! | `force`, `preset` | boolean: use the preset grid |
//! | `grid` | `COLSxROWS`, e.g. `6x6` |
//! | `count`, `limit` | photos to place, `0` for all |
//! | `gap` | gap in millimeters |
//! | `caption` | boolean |
//!
//! Unset keys keep [`PrintSettings::default`] values. Problems never fail
//! the parse; they are reported as [`ParseWarning`]s.

mod parse;

use alloc::string::String;
use alloc::vec::Vec;

use crate::settings::PrintSettings;

/// Result of parsing a print query string.
#[derive(Debug, Clone)]
pub struct ParseResult {
    pub settings: PrintSettings<'static>,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from query string parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key was not recognized.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a print query string (with or without leading `?`).
pub fn parse(query: &str) -> ParseResult {
    let (settings, warnings) = parse::parse_query(query);
    for warning in &warnings {
        log::debug!("print query: {warning:?}");
    }
    ParseResult { settings, warnings }
}
