use serde::{Deserialize, Serialize};

use crate::*;

/// Sizing rules for rendering the two grids side by side.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Share of the smaller viewport axis the two grids may occupy.
    pub margin: f64,
    /// Share of the usable length kept free between the grids.
    pub gap_ratio: f64,
    /// Upper bound on a single grid's extent, in pixels.
    pub max_board_extent: f64,
    /// Viewports narrower than this use the small-screen extent bound.
    pub small_screen_width: f64,
    /// Factor applied to `max_board_extent` on small screens.
    pub small_screen_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 0.9,
            gap_ratio: 0.02,
            max_board_extent: 640.0,
            small_screen_width: 640.0,
            small_screen_scale: 0.25,
        }
    }
}

impl LayoutConfig {
    /// Pixel length of one grid side.
    ///
    /// Zero when either dimension is non-positive or NaN, strictly positive otherwise. Infinite
    /// dimensions are treated as the largest finite length.
    pub fn board_extent(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        if !is_usable(viewport_width, viewport_height) {
            return 0.0;
        }
        let usable = self.usable_length(viewport_width, viewport_height);
        let extent = usable * (1.0 - self.gap_share()) / 2.0;
        match self.extent_bound(viewport_width) {
            Some(bound) => extent.min(bound),
            None => extent,
        }
        .max(f64::MIN_POSITIVE)
    }

    /// Gap between the two grids for the given viewport.
    pub fn gap(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        self.usable_length(viewport_width, viewport_height) * self.gap_share()
    }

    pub fn cell_size(&self, viewport_width: f64, viewport_height: f64, board_size: Coord) -> f64 {
        let extent = self.board_extent(viewport_width, viewport_height);
        if extent <= 0.0 {
            return 0.0;
        }
        (extent / f64::from(board_size.max(1))).max(f64::MIN_POSITIVE)
    }

    fn usable_length(&self, viewport_width: f64, viewport_height: f64) -> f64 {
        if !is_usable(viewport_width, viewport_height) {
            return 0.0;
        }
        let axis = viewport_width.min(viewport_height).min(f64::MAX);
        let margin = if self.margin > 0.0 { self.margin.min(1.0) } else { 1.0 };
        axis * margin
    }

    fn gap_share(&self) -> f64 {
        if self.gap_ratio > 0.0 {
            self.gap_ratio.min(0.5)
        } else {
            0.0
        }
    }

    fn extent_bound(&self, viewport_width: f64) -> Option<f64> {
        let small_screen = viewport_width < self.small_screen_width
            && self.small_screen_scale > 0.0
            && self.small_screen_scale < 1.0;
        (self.max_board_extent > 0.0).then(|| {
            if small_screen {
                self.max_board_extent * self.small_screen_scale
            } else {
                self.max_board_extent
            }
        })
    }
}

/// Both dimensions positive, NaN fails the comparison.
fn is_usable(viewport_width: f64, viewport_height: f64) -> bool {
    viewport_width > 0.0 && viewport_height > 0.0
}

/// Per-cell pixel size with the default [`LayoutConfig`].
pub fn cell_size(viewport_width: f64, viewport_height: f64, board_size: Coord) -> f64 {
    LayoutConfig::default().cell_size(viewport_width, viewport_height, board_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bigger_boards_get_smaller_cells() {
        let coarse = cell_size(1200.0, 800.0, 32);
        let fine = cell_size(1200.0, 800.0, 64);
        assert!(fine <= coarse);
        assert!(fine > 0.0);
    }

    #[test]
    fn extent_is_capped_on_large_screens() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.board_extent(4000.0, 3000.0), 640.0);
        assert_eq!(layout.cell_size(4000.0, 3000.0, 64), 10.0);
    }

    #[test]
    fn small_screens_use_the_scaled_bound() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.board_extent(600.0, 800.0), 160.0);
        assert_eq!(layout.cell_size(600.0, 800.0, 16), 10.0);
        // unaffected while the proportional extent is below the bound
        assert!(layout.board_extent(300.0, 100.0) < 160.0);
        assert!((layout.board_extent(700.0, 800.0) - 308.7).abs() < 1e-9);
    }

    #[test]
    fn unusable_viewports_give_zero() {
        assert_eq!(cell_size(0.0, 800.0, 8), 0.0);
        assert_eq!(cell_size(-5.0, 800.0, 8), 0.0);
        assert_eq!(cell_size(f64::NAN, 800.0, 8), 0.0);
        assert_eq!(cell_size(800.0, f64::NEG_INFINITY, 8), 0.0);
    }

    #[test]
    fn positive_viewports_always_give_positive_cells() {
        assert!(cell_size(5e-324, 5e-324, 1) > 0.0);
        assert!(cell_size(1e-300, 1e-300, 255) > 0.0);
        assert_eq!(cell_size(f64::INFINITY, 800.0, 8), cell_size(4000.0, 800.0, 8));
        assert_eq!(cell_size(f64::INFINITY, f64::INFINITY, 64), 10.0);

        let unbounded = LayoutConfig {
            max_board_extent: 0.0,
            ..LayoutConfig::default()
        };
        let cell = unbounded.cell_size(f64::INFINITY, f64::INFINITY, 64);
        assert!(cell.is_finite() && cell > 0.0);
    }

    proptest! {
        #[test]
        fn both_grids_and_gap_fit(
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
            board_size in 1u8..=255,
        ) {
            let layout = LayoutConfig::default();
            let cell = layout.cell_size(width, height, board_size);
            let used = 2.0 * cell * f64::from(board_size) + layout.gap(width, height);
            prop_assert!(cell > 0.0);
            prop_assert!(used <= width.min(height) * (1.0 + 1e-9));
        }

        #[test]
        fn cell_size_never_grows_with_board_size(
            width in 1.0f64..5000.0,
            height in 1.0f64..5000.0,
            board_size in 1u8..255,
        ) {
            prop_assert!(cell_size(width, height, board_size + 1) <= cell_size(width, height, board_size));
        }
    }
}
