//! StringArt builder -- the one-call entry point for the crate.
//!
//! [`StringArt`] runs the whole chain: grid from samples, perimeter
//! endpoint graph, line synthesis, rank-and-prune.

use crate::api::StringArtError;
use crate::color::ColorSample;
use crate::endpoints::EndpointGraph;
use crate::grid::{Grid, DEFAULT_PASSES_SCALER};
use crate::synth::{LineSynthesizer, PruneOptions, SweepOrder, SynthOptions, Synthesis};

/// Everything one run produced.
#[derive(Debug, Clone)]
pub struct Artwork {
    /// Grid with final pass counters and cursors
    pub grid: Grid,
    /// Endpoints and candidate pool the lines were chosen from
    pub graph: EndpointGraph,
    /// Pruned lines, best rank first, plus run counters
    pub synthesis: Synthesis,
}

/// High-level string-art builder.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`render()`](Self::render) takes `&self`, so one builder can process
///   many images
/// - Every run starts from fresh cells; no state leaks between renders
///
/// # Example
///
/// ```
/// use string_art::{ColorSample, StringArt};
///
/// let black = Some(ColorSample::rgb(0, 0, 0));
/// let white = Some(ColorSample::rgb(255, 255, 255));
/// let samples = vec![black, white, white, black];
///
/// let artwork = StringArt::new()
///     .max_sweeps(200)
///     .render(2, 2, 16.0, &samples)
///     .unwrap();
///
/// assert!(!artwork.synthesis.lines.is_empty());
/// assert_eq!(artwork.graph.endpoints().len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StringArt {
    synth: SynthOptions,
    prune: PruneOptions,
    passes_scaler: f64,
}

impl Default for StringArt {
    fn default() -> Self {
        Self {
            synth: SynthOptions::default(),
            prune: PruneOptions::default(),
            passes_scaler: DEFAULT_PASSES_SCALER,
        }
    }
}

impl StringArt {
    /// Create a builder with default options.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all synthesis options at once.
    #[inline]
    pub fn synth_options(mut self, options: SynthOptions) -> Self {
        self.synth = options;
        self
    }

    /// Replace all pruning options at once.
    #[inline]
    pub fn prune_options(mut self, options: PruneOptions) -> Self {
        self.prune = options;
        self
    }

    /// Passes requested by a fully black cell.
    #[inline]
    pub fn passes_scaler(mut self, scaler: f64) -> Self {
        self.passes_scaler = scaler;
        self
    }

    /// Set the good-hit delta-E threshold.
    #[inline]
    pub fn good_delta_e(mut self, threshold: f64) -> Self {
        self.synth = self.synth.good_delta_e(threshold);
        self
    }

    /// Set the bad-band delta-E threshold.
    #[inline]
    pub fn bad_delta_e(mut self, threshold: f64) -> Self {
        self.synth = self.synth.bad_delta_e(threshold);
        self
    }

    /// Set the sweep budget.
    #[inline]
    pub fn max_sweeps(mut self, sweeps: usize) -> Self {
        self.synth = self.synth.max_sweeps(sweeps);
        self
    }

    /// Set the driving-cell visit order.
    #[inline]
    pub fn sweep_order(mut self, order: SweepOrder) -> Self {
        self.synth = self.synth.sweep_order(order);
        self
    }

    /// Drop lines ranked worse than `rank`.
    #[inline]
    pub fn max_rank(mut self, rank: f64) -> Self {
        self.prune = self.prune.max_rank(rank);
        self
    }

    /// Keep at most `lines` lines (subject to the `min_lines` floor).
    #[inline]
    pub fn max_lines(mut self, lines: usize) -> Self {
        self.prune = self.prune.max_lines(lines);
        self
    }

    /// Floor of the line-count bound.
    #[inline]
    pub fn min_lines(mut self, lines: usize) -> Self {
        self.prune = self.prune.min_lines(lines);
        self
    }

    /// Synthesis options in effect.
    #[inline]
    pub fn synth(&self) -> &SynthOptions {
        &self.synth
    }

    /// Pruning options in effect.
    #[inline]
    pub fn prune(&self) -> &PruneOptions {
        &self.prune
    }

    /// Run the full chain over row-major `samples`.
    ///
    /// 1. Build the grid (column-major insertion)
    /// 2. Enumerate perimeter endpoints and freeze the candidate pool
    /// 3. Sweep until budgets are met or the sweep cap is hit
    /// 4. Rank and prune
    pub fn render(
        &self,
        columns: u32,
        rows: u32,
        cell_size: f64,
        samples: &[Option<ColorSample>],
    ) -> Result<Artwork, StringArtError> {
        let mut grid = Grid::from_samples(columns, rows, cell_size, samples, self.passes_scaler)?;
        let graph = EndpointGraph::perimeter(grid.columns(), grid.rows(), grid.cell_size());

        let synthesis = LineSynthesizer::new(&graph, self.synth.clone())
            .run(&mut grid)
            .prune(&self.prune);

        Ok(Artwork {
            grid,
            graph,
            synthesis,
        })
    }
}
