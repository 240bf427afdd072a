//! Physical photo size standards.
//!
//! A [`PhotoStandard`] is the size a document authority expects a photo to
//! print at. The composition engine only reads its millimeter dimensions;
//! the labels are carried for callers and captions. Labels are borrowed, so
//! a catalog loaded at runtime works as well as the built-in [`CATALOG`].
//!
//! # Example
//!
//! ```
//! use printsheet::standard::{self, PhotoStandard};
//!
//! let uk = standard::find("uk_eu").unwrap();
//! assert_eq!((uk.width_mm, uk.height_mm), (35.0, 45.0));
//!
//! let custom = PhotoStandard::custom(30.0, 40.0).unwrap();
//! assert_eq!(custom.aspect_ratio(), 0.75);
//! ```

use crate::error::SheetError;

/// A named physical photo size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhotoStandard<'a> {
    /// Stable identifier, e.g. `uk_eu`.
    pub id: &'a str,
    /// Human-readable name.
    pub name: &'a str,
    /// Short description of the size.
    pub description: &'a str,
    /// Printed width in millimeters.
    pub width_mm: f64,
    /// Printed height in millimeters.
    pub height_mm: f64,
}

impl<'a> PhotoStandard<'a> {
    /// Create a standard, rejecting non-positive or non-finite dimensions.
    pub fn new(
        id: &'a str,
        name: &'a str,
        description: &'a str,
        width_mm: f64,
        height_mm: f64,
    ) -> Result<Self, SheetError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width_mm) || !valid(height_mm) {
            return Err(SheetError::InvalidStandard {
                width_mm,
                height_mm,
            });
        }
        Ok(Self {
            id,
            name,
            description,
            width_mm,
            height_mm,
        })
    }

    /// An unnamed standard of the given size.
    pub fn custom(width_mm: f64, height_mm: f64) -> Result<Self, SheetError> {
        Self::new("custom", "Custom", "Custom size", width_mm, height_mm)
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width_mm / self.height_mm
    }
}

impl Default for PhotoStandard<'_> {
    fn default() -> Self {
        UK_EU
    }
}

/// United States passport, 2×2 inches.
pub const US_2X2: PhotoStandard<'static> = PhotoStandard {
    id: "us_2x2",
    name: "United States (2x2\")",
    description: "2x2 inch (51x51mm)",
    width_mm: 51.0,
    height_mm: 51.0,
};

/// The common 35×45 mm size used across the UK and EU.
pub const UK_EU: PhotoStandard<'static> = PhotoStandard {
    id: "uk_eu",
    name: "Standard / UK / EU",
    description: "35x45mm (Most Common)",
    width_mm: 35.0,
    height_mm: 45.0,
};

/// India PAN card.
pub const IN_PAN: PhotoStandard<'static> = PhotoStandard {
    id: "in_pan",
    name: "India - PAN Card (UTI/NSDL)",
    description: "25x35mm (Strictly for PAN)",
    width_mm: 25.0,
    height_mm: 35.0,
};

/// Stamp size.
pub const IN_STAMP: PhotoStandard<'static> = PhotoStandard {
    id: "in_stamp",
    name: "Stamp Size",
    description: "20x25mm",
    width_mm: 20.0,
    height_mm: 25.0,
};

/// Built-in standards, in display order.
pub const CATALOG: &[PhotoStandard<'static>] = &[US_2X2, UK_EU, IN_PAN, IN_STAMP];

/// Look up a built-in standard by id (ASCII case-insensitive).
pub fn find(id: &str) -> Option<PhotoStandard<'static>> {
    CATALOG
        .iter()
        .find(|s| s.id.eq_ignore_ascii_case(id.trim()))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_entries_are_valid() {
        for s in CATALOG {
            let checked = PhotoStandard::new(s.id, s.name, s.description, s.width_mm, s.height_mm);
            assert!(checked.is_ok(), "{} invalid", s.id);
        }
    }

    #[test]
    fn catalog_ids_unique() {
        for (i, a) in CATALOG.iter().enumerate() {
            for b in &CATALOG[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("UK_EU"), Some(UK_EU));
        assert_eq!(find(" us_2x2 "), Some(US_2X2));
        assert_eq!(find("nope"), None);
    }

    #[test]
    fn aspect_ratio_is_width_over_height() {
        assert!((UK_EU.aspect_ratio() - 35.0 / 45.0).abs() < 1e-12);
        assert_eq!(US_2X2.aspect_ratio(), 1.0);
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(
            PhotoStandard::custom(0.0, 45.0),
            Err(SheetError::InvalidStandard { .. })
        ));
        assert!(matches!(
            PhotoStandard::custom(35.0, -1.0),
            Err(SheetError::InvalidStandard { .. })
        ));
        assert!(matches!(
            PhotoStandard::custom(f64::NAN, 45.0),
            Err(SheetError::InvalidStandard { .. })
        ));
    }

    #[test]
    fn standard_from_loaded_labels() {
        // Labels borrowed from a local buffer, as if read from a file.
        let buf = *b"au|Australia|35x45mm";
        let row = core::str::from_utf8(&buf).unwrap();
        let mut fields = row.split('|');
        let (id, name, description) = (
            fields.next().unwrap(),
            fields.next().unwrap(),
            fields.next().unwrap(),
        );
        let au = PhotoStandard::new(id, name, description, 35.0, 45.0).unwrap();
        assert_eq!(au.id, "au");
        assert_eq!(au.aspect_ratio(), UK_EU.aspect_ratio());
        let copy = au;
        assert_eq!(copy, au);
    }

    #[test]
    fn default_is_uk_eu() {
        assert_eq!(PhotoStandard::default().id, "uk_eu");
    }
}
