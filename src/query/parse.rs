//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use crate::grid::ForcedGrid;
use crate::settings::PrintSettings;
use crate::sheet::{Orientation, SheetSize};
use crate::standard::{self, PhotoStandard};

/// Every setting the query can carry, unset until seen.
#[derive(Default)]
struct Fields {
    standard: Option<PhotoStandard<'static>>,
    paper: Option<SheetSize>,
    orientation: Option<Orientation>,
    cut_guides: Option<bool>,
    force_layout: Option<bool>,
    grid: Option<ForcedGrid>,
    count: Option<u32>,
    gap_mm: Option<f64>,
    caption: Option<bool>,
}

impl Fields {
    fn into_settings(self) -> PrintSettings<'static> {
        let d = PrintSettings::default();
        PrintSettings {
            standard: self.standard.unwrap_or(d.standard),
            paper: self.paper.unwrap_or(d.paper),
            orientation: self.orientation.unwrap_or(d.orientation),
            cut_guides: self.cut_guides.unwrap_or(d.cut_guides),
            force_layout: self.force_layout.unwrap_or(d.force_layout),
            grid: self.grid.or(d.grid),
            gap_mm: self.gap_mm.or(d.gap_mm),
            custom_count: self.count.filter(|&n| n > 0).or(d.custom_count),
            caption: self.caption.unwrap_or(d.caption),
        }
    }
}

/// Parse a print query string into settings + warnings.
pub(crate) fn parse_query(query: &str) -> (PrintSettings<'static>, Vec<ParseWarning>) {
    let mut fields = Fields::default();
    let mut warnings = Vec::new();

    for pair in split_query(query) {
        let (raw_key, raw_value) = split_pair(pair);
        let key = percent_decode(&raw_key).to_ascii_lowercase();
        let value = percent_decode(&raw_value);

        dispatch_key(&key, &value, &mut fields, &mut warnings);
    }

    (fields.into_settings(), warnings)
}

fn dispatch_key(key: &str, value: &str, fields: &mut Fields, warnings: &mut Vec<ParseWarning>) {
    match key {
        "standard" | "std" => match standard::find(value) {
            Some(s) => set_or_warn(&mut fields.standard, Some(s), key, value, warnings),
            None => invalid(
                "standard",
                value,
                "expected us_2x2|uk_eu|in_pan|in_stamp",
                warnings,
            ),
        },
        "paper" | "size" | "sheet" => match value.parse::<SheetSize>() {
            Ok(size) => set_or_warn(&mut fields.paper, Some(size), key, value, warnings),
            Err(_) => invalid("paper", value, "expected 4x6|a4", warnings),
        },
        "orientation" | "o" => match value.parse::<Orientation>() {
            Ok(o) => set_or_warn(&mut fields.orientation, Some(o), key, value, warnings),
            Err(_) => invalid("orientation", value, "expected portrait|landscape", warnings),
        },
        "cut" | "cutguides" | "border" => match parse_bool(value) {
            Some(b) => set_or_warn(&mut fields.cut_guides, Some(b), key, value, warnings),
            None => invalid("cut", value, BOOL_REASON, warnings),
        },
        "force" | "preset" => match parse_bool(value) {
            Some(b) => set_or_warn(&mut fields.force_layout, Some(b), key, value, warnings),
            None => invalid("force", value, BOOL_REASON, warnings),
        },
        "caption" => match parse_bool(value) {
            Some(b) => set_or_warn(&mut fields.caption, Some(b), key, value, warnings),
            None => invalid("caption", value, BOOL_REASON, warnings),
        },
        "grid" => match parse_grid(value) {
            Some(g) => set_or_warn(&mut fields.grid, Some(g), key, value, warnings),
            None => invalid("grid", value, "expected COLSxROWS, both positive", warnings),
        },
        "count" | "limit" => match value.trim().parse::<u32>() {
            Ok(n) => set_or_warn(&mut fields.count, Some(n), key, value, warnings),
            Err(_) => invalid("count", value, "expected a non-negative integer", warnings),
        },
        "gap" => match parse_gap(value) {
            Some(g) => set_or_warn(&mut fields.gap_mm, Some(g), key, value, warnings),
            None => invalid("gap", value, "expected millimeters >= 0", warnings),
        },
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

const BOOL_REASON: &str = "expected true|false|1|0|yes|no|on|off";

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if let Some(v) = parsed {
        if field.is_some() {
            warnings.push(ParseWarning::DuplicateKey {
                key: String::from(key),
                value: String::from(value),
            });
        }
        *field = Some(v);
    }
}

fn invalid(key: &'static str, value: &str, reason: &'static str, warnings: &mut Vec<ParseWarning>) {
    warnings.push(ParseWarning::ValueInvalid {
        key,
        value: String::from(value),
        reason,
    });
}

// ---- Value parsers ----

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `6x6`, `3X4`, `3*4`.
fn parse_grid(s: &str) -> Option<ForcedGrid> {
    let (cols, rows) = s.trim().split_once(['x', 'X', '*'])?;
    let cols = cols.trim().parse::<u32>().ok().filter(|&v| v > 0)?;
    let rows = rows.trim().parse::<u32>().ok().filter(|&v| v > 0)?;
    Some(ForcedGrid::new(cols, rows))
}

/// Millimeters, with an optional `mm` suffix.
fn parse_gap(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix("mm").unwrap_or(s).trim();
    s.parse::<f64>().ok().filter(|v| v.is_finite() && *v >= 0.0)
}

// ---- Query string tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (String, String) {
    match pair.find('=') {
        Some(pos) => (String::from(&pair[..pos]), String::from(&pair[pos + 1..])),
        None => (String::from(pair), String::new()),
    }
}

/// Percent-decode a URL component. Also handles '+' as space.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
