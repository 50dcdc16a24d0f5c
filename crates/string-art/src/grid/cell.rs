//! Per-position grid cell
//!
//! A [`Cell`] carries everything derived once from its color sample (Lab,
//! ink budget, layer) plus the two pieces of state the synthesizer mutates:
//! the pass counter and the scan cursor into the candidate pool.

use crate::color::{ColorSample, Lab};
use crate::geometry::Point;

/// Lab lightness above which a cell is treated as paper and never inked.
pub const WHITE_THRESHOLD: f64 = 95.0;

/// Delta-E from white below which an opaque cell is reserved as white.
pub const RESERVE_WHITE_DELTA_E: f64 = 30.0;

/// Width of one layer bucket in delta-E units.
pub const LAYER_WIDTH: f64 = 20.0;

/// Pass cap for transparent cells.
pub const TRANSPARENT_MAXIMUM_PASSES: u32 = 100;

/// Unique grid position of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    /// Column index (x)
    pub column: u32,
    /// Row index (y)
    pub row: u32,
}

impl CellKey {
    /// Create a new key.
    #[inline]
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.column, self.row)
    }
}

/// One grid square's aggregated color and ink-budget state.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Grid position
    pub key: CellKey,
    /// Top-left corner in pixel space
    pub location: Point,
    /// Edge length in pixels
    pub size: f64,
    /// Averaged source color
    pub color: ColorSample,
    /// Rec. 601 luminance (0.0 for transparent cells)
    pub luminance: f64,
    /// Lab coordinates ((0,0,0) for transparent cells)
    pub lab: Lab,
    /// Distance from pure white
    pub delta_e_white: f64,
    /// Ink budget: how many good crossings this cell wants
    pub desired_passes: u32,
    /// Hard cap on crossings credited to this cell
    pub maximum_passes: u32,
    /// Good crossings credited so far
    pub passes: u32,
    /// Pool position of the last line this cell accepted, -1 before any
    pub last_index: isize,
    /// Fully transparent source sample
    pub is_transparent: bool,
    /// Opaque but close enough to white to stay out of active layering
    pub reserve_white: bool,
    /// `floor(delta_e_white / 20)`
    pub layer: u32,
}

impl Cell {
    /// Derive a cell from its color sample.
    ///
    /// `passes_scaler` is the number of passes a fully black cell wants.
    pub fn new(
        key: CellKey,
        location: Point,
        size: f64,
        color: ColorSample,
        passes_scaler: f64,
    ) -> Self {
        let is_transparent = color.is_transparent();

        let (luminance, lab, desired_passes) = if is_transparent {
            (0.0, Lab::default(), 0)
        } else {
            let luminance = color.luminance();
            let lab = Lab::from(color);
            let desired_passes = if lab.l > WHITE_THRESHOLD {
                0
            } else {
                ((1.0 - luminance) * passes_scaler).round().max(0.0) as u32
            };
            (luminance, lab, desired_passes)
        };

        let delta_e_white = lab.distance(Lab::WHITE);
        let maximum_passes = if is_transparent {
            TRANSPARENT_MAXIMUM_PASSES
        } else {
            desired_passes.saturating_mul(2).saturating_add(4)
        };

        Self {
            key,
            location,
            size,
            color,
            luminance,
            lab,
            delta_e_white,
            desired_passes,
            maximum_passes,
            passes: 0,
            last_index: -1,
            is_transparent,
            reserve_white: !is_transparent && delta_e_white < RESERVE_WHITE_DELTA_E,
            layer: (delta_e_white / LAYER_WIDTH).floor() as u32,
        }
    }

    /// Passes still owed to this cell.
    #[inline]
    pub fn deficit(&self) -> u32 {
        self.desired_passes.saturating_sub(self.passes)
    }

    /// Whether this cell may drive line selection right now.
    #[inline]
    pub fn wants_ink(&self) -> bool {
        self.passes < self.desired_passes && self.lab.l < WHITE_THRESHOLD
    }

    /// Whether one more crossing would reach the pass cap.
    #[inline]
    pub fn at_cap_after_next(&self) -> bool {
        self.passes.saturating_add(1) >= self.maximum_passes
    }

    /// Credit one good crossing, saturating at the cap.
    #[inline]
    pub fn credit_pass(&mut self) {
        self.passes = self.passes.saturating_add(1).min(self.maximum_passes);
    }

    /// Reset synthesis state so the cell can be reused for another run.
    pub fn reset(&mut self) {
        self.passes = 0;
        self.last_index = -1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(color: ColorSample) -> Cell {
        Cell::new(CellKey::new(0, 0), Point::default(), 10.0, color, 10.0)
    }

    #[test]
    fn test_black_cell_budget() {
        let black = cell(ColorSample::rgb(0, 0, 0));
        assert_eq!(black.desired_passes, 10);
        assert_eq!(black.maximum_passes, 24);
        assert_eq!(black.layer, 5);
        assert!(!black.reserve_white);
        assert!(black.wants_ink());
    }

    #[test]
    fn test_white_cell_has_no_budget() {
        let white = cell(ColorSample::rgb(255, 255, 255));
        assert_eq!(white.desired_passes, 0);
        assert_eq!(white.maximum_passes, 4);
        assert_eq!(white.layer, 0);
        assert!(white.reserve_white);
        assert!(!white.wants_ink());
    }

    #[test]
    fn test_near_white_cell_is_forced_to_zero() {
        // Luminance ~= 0.94 alone would ask for one pass, but L ~= 96.4
        let tint = cell(ColorSample::rgb(200, 255, 255));
        assert!(tint.lab.l > WHITE_THRESHOLD);
        assert_eq!(tint.desired_passes, 0);
    }

    #[test]
    fn test_transparent_cell() {
        let clear = cell(ColorSample::rgba(0, 0, 0, 0));
        assert!(clear.is_transparent);
        assert_eq!(clear.desired_passes, 0);
        assert_eq!(clear.maximum_passes, TRANSPARENT_MAXIMUM_PASSES);
        assert_eq!(clear.luminance, 0.0);
        assert_eq!(clear.lab, Lab::default());
        assert!(!clear.reserve_white);
    }

    #[test]
    fn test_mid_gray_layer() {
        let gray = cell(ColorSample::rgb(128, 128, 128));
        // L ~= 53.6 -> delta_e_white ~= 46.4 -> layer 2
        assert_eq!(gray.layer, 2);
        assert_eq!(gray.desired_passes, 5);
    }

    #[test]
    fn test_credit_pass_saturates() {
        let mut white = cell(ColorSample::rgb(255, 255, 255));
        for _ in 0..10 {
            white.credit_pass();
        }
        assert_eq!(white.passes, white.maximum_passes);
    }

    #[test]
    fn test_huge_scaler_saturates_cap() {
        let black = Cell::new(
            CellKey::new(0, 0),
            Point::default(),
            10.0,
            ColorSample::rgb(0, 0, 0),
            1.0e12,
        );
        assert_eq!(black.desired_passes, u32::MAX);
        assert_eq!(black.maximum_passes, u32::MAX);
        assert!(!black.at_cap_after_next());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CellKey::new(3, 14).to_string(), "3_14");
    }
}
