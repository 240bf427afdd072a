//! Application-level print choices and their mapping to [`LayoutOptions`].

use crate::grid::{ForcedGrid, LayoutOptions};
use crate::sheet::{Orientation, SheetSize, SheetSpec};
use crate::standard::{PhotoStandard, UK_EU};

/// What the user picked on the print screen.
///
/// Defaults: UK/EU standard on portrait A4, cut guides on, preset grid on,
/// every slot filled.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PrintSettings<'a> {
    pub standard: PhotoStandard<'a>,
    pub paper: SheetSize,
    pub orientation: Orientation,
    /// 4 mm gap plus a 1 px border per tile.
    pub cut_guides: bool,
    /// Use the standard's preset grid for the paper size, if it has one.
    pub force_layout: bool,
    /// Explicit grid; takes precedence over the preset.
    pub grid: Option<ForcedGrid>,
    /// Gap override in millimeters; takes precedence over cut guide spacing.
    pub gap_mm: Option<f64>,
    /// Place only this many photos.
    pub custom_count: Option<u32>,
    pub caption: bool,
}

impl Default for PrintSettings<'_> {
    fn default() -> Self {
        Self {
            standard: UK_EU,
            paper: SheetSize::A4,
            orientation: Orientation::Portrait,
            cut_guides: true,
            force_layout: true,
            grid: None,
            gap_mm: None,
            custom_count: None,
            caption: true,
        }
    }
}

impl PrintSettings<'_> {
    pub fn sheet(&self) -> SheetSpec {
        SheetSpec::new(self.paper, self.orientation)
    }

    /// The grid that will be forced, if any.
    pub fn forced_grid(&self) -> Option<ForcedGrid> {
        self.grid.or_else(|| {
            self.force_layout
                .then(|| ForcedGrid::preset(self.standard.id, self.paper))
                .flatten()
        })
    }

    pub fn to_layout_options(&self) -> LayoutOptions {
        let mut options = LayoutOptions::new()
            .cut_guides(self.cut_guides)
            .caption(self.caption);
        if let Some(gap) = self.gap_mm {
            options = options.gap_mm(gap);
        }
        options.force_grid = self.forced_grid();
        options.limit = self.custom_count;
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::compute_layout;
    use crate::standard::{IN_PAN, US_2X2};

    #[test]
    fn defaults_match_print_screen() {
        let options = PrintSettings::default().to_layout_options();
        assert_eq!(options.gap_mm, 4.0);
        assert!(options.border);
        assert_eq!(options.force_grid, Some(ForcedGrid::new(6, 6)));
        assert_eq!(options.limit, None);
    }

    #[test]
    fn preset_follows_paper() {
        let settings = PrintSettings {
            standard: US_2X2,
            paper: SheetSize::Photo4x6,
            ..PrintSettings::default()
        };
        assert_eq!(settings.forced_grid(), Some(ForcedGrid::new(3, 4)));
    }

    #[test]
    fn no_preset_falls_back_to_auto_fit() {
        let settings = PrintSettings {
            standard: IN_PAN,
            ..PrintSettings::default()
        };
        assert_eq!(settings.forced_grid(), None);
        let layout = compute_layout(
            &settings.standard,
            settings.sheet(),
            &settings.to_layout_options(),
        )
        .unwrap();
        assert!(!layout.mode.is_forced());
    }

    #[test]
    fn explicit_grid_beats_preset() {
        let settings = PrintSettings {
            grid: Some(ForcedGrid::new(2, 2)),
            ..PrintSettings::default()
        };
        assert_eq!(settings.forced_grid(), Some(ForcedGrid::new(2, 2)));
    }

    #[test]
    fn cut_guides_off_means_no_gap() {
        let settings = PrintSettings {
            cut_guides: false,
            force_layout: false,
            ..PrintSettings::default()
        };
        let options = settings.to_layout_options();
        assert_eq!(options.gap_mm, 0.0);
        assert!(!options.border);
        assert_eq!(options.force_grid, None);
    }

    #[test]
    fn gap_override_keeps_border() {
        let settings = PrintSettings {
            gap_mm: Some(2.0),
            custom_count: Some(4),
            ..PrintSettings::default()
        };
        let options = settings.to_layout_options();
        assert_eq!(options.gap_mm, 2.0);
        assert!(options.border);
        assert_eq!(options.limit, Some(4));
    }
}
