//! Synthesis and pruning options.
//!
//! Both option structs follow the same pattern: `Default` carries the tuned
//! values, `new()` is the discoverable alias, and consuming setters allow
//! chained overrides.

/// Default delta-E below which a crossed cell counts as a good hit.
pub const DEFAULT_GOOD_DELTA_E: f64 = 10.0;

/// Default delta-E above which a crossed cell is a bad-band hit.
pub const DEFAULT_BAD_DELTA_E: f64 = 100.0;

/// Default sweep budget.
pub const DEFAULT_MAX_SWEEPS: usize = 1000;

/// Default floor for the line-count bound.
pub const DEFAULT_MIN_LINES: usize = 100;

/// Order in which a sweep visits driving cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepOrder {
    /// Grid insertion order (column by column)
    #[default]
    Grid,
    /// Farthest-from-white layer first, reserve-white cells never drive
    LayerDescending,
}

/// Configuration for [`LineSynthesizer`](super::LineSynthesizer).
///
/// # Example
///
/// ```
/// use string_art::{SweepOrder, SynthOptions};
///
/// let options = SynthOptions::new()
///     .max_sweeps(200)
///     .sweep_order(SweepOrder::LayerDescending);
/// assert_eq!(options.max_sweeps, 200);
/// assert_eq!(options.good_delta_e, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SynthOptions {
    /// Crossed cells closer than this to the driving cell are good hits and
    /// get credited a pass on acceptance.
    ///
    /// Default: `10.0`
    pub good_delta_e: f64,

    /// Upper edge of the tolerated band. Cells beyond it and cells inside
    /// the band are both refused only once they are at their pass cap, so
    /// the value is reported but does not change acceptance.
    ///
    /// Default: `100.0`
    pub bad_delta_e: f64,

    /// Safety valve against ink budgets that can never be met.
    ///
    /// Default: `1000`
    pub max_sweeps: usize,

    /// Driving-cell visit order.
    ///
    /// Default: [`SweepOrder::Grid`]
    pub sweep_order: SweepOrder,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            good_delta_e: DEFAULT_GOOD_DELTA_E,
            bad_delta_e: DEFAULT_BAD_DELTA_E,
            max_sweeps: DEFAULT_MAX_SWEEPS,
            sweep_order: SweepOrder::Grid,
        }
    }
}

impl SynthOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the good-hit delta-E threshold.
    #[inline]
    pub fn good_delta_e(mut self, threshold: f64) -> Self {
        self.good_delta_e = threshold;
        self
    }

    /// Set the bad-band delta-E threshold.
    #[inline]
    pub fn bad_delta_e(mut self, threshold: f64) -> Self {
        self.bad_delta_e = threshold;
        self
    }

    /// Set the sweep budget.
    #[inline]
    pub fn max_sweeps(mut self, sweeps: usize) -> Self {
        self.max_sweeps = sweeps;
        self
    }

    /// Set the sweep order.
    #[inline]
    pub fn sweep_order(mut self, order: SweepOrder) -> Self {
        self.sweep_order = order;
        self
    }
}

/// Post-synthesis pruning bounds.
///
/// Lines are sorted by rank (best first) and then cut by two independent
/// bounds. Pruning only affects readability of the drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOptions {
    /// Drop lines whose rank exceeds this value.
    ///
    /// Default: `None` (no rank bound)
    pub max_rank: Option<f64>,

    /// Keep at most this many lines, but never fewer than `min_lines`.
    ///
    /// Default: `None` (no count bound)
    pub max_lines: Option<usize>,

    /// Floor applied to `max_lines`.
    ///
    /// Default: `100`
    pub min_lines: usize,
}

impl Default for PruneOptions {
    fn default() -> Self {
        Self {
            max_rank: None,
            max_lines: None,
            min_lines: DEFAULT_MIN_LINES,
        }
    }
}

impl PruneOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rank bound.
    #[inline]
    pub fn max_rank(mut self, rank: f64) -> Self {
        self.max_rank = Some(rank);
        self
    }

    /// Set the count bound.
    #[inline]
    pub fn max_lines(mut self, lines: usize) -> Self {
        self.max_lines = Some(lines);
        self
    }

    /// Set the floor of the count bound.
    #[inline]
    pub fn min_lines(mut self, lines: usize) -> Self {
        self.min_lines = lines;
        self
    }

    /// The count bound after applying the floor.
    #[inline]
    pub fn effective_max_lines(&self) -> Option<usize> {
        self.max_lines.map(|limit| limit.max(self.min_lines))
    }
}
