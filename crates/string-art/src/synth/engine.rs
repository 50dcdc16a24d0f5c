//! Greedy best-fit line selection.
//!
//! Each sweep visits every cell that still owes passes. A visiting cell scans
//! the candidate pool starting just after the last pair it accepted and takes
//! the first pair that crosses its own box without pushing any dissimilar,
//! already saturated cell over its cap. Accepting a pair credits a pass to
//! every crossed cell that looks like the driving cell.
//!
//! A run is fully determined by the grid, the pool order and the sweep
//! order; nothing here depends on hash iteration or wall-clock time.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::line::Line;
use super::options::{SweepOrder, SynthOptions};
use crate::endpoints::{Candidate, EndpointGraph, PairId};
use crate::grid::Grid;

/// Outcome counters of one synthesis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynthesisReport {
    /// Sweeps executed
    pub sweeps: usize,
    /// Passes still owed by driving cells when the run stopped
    pub residual_deficit: u64,
    /// True when every driving cell met its ink budget
    pub converged: bool,
    /// Lines accepted during synthesis
    pub accepted: usize,
    /// Lines left after pruning (equal to `accepted` before pruning)
    pub retained: usize,
    /// Size of the candidate pool
    pub candidates: usize,
}

/// Lines plus the report of the run that produced them.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    /// Lines in acceptance order, or rank order after pruning
    pub lines: Vec<Line>,
    /// Run counters
    pub report: SynthesisReport,
}

/// Tally of one candidate against the cells it crosses.
#[derive(Debug, Default)]
struct Verdict {
    /// Crossed cells to credit on acceptance
    good: Vec<usize>,
    /// Crossed cells that would exceed their cap
    bad: usize,
    /// Tolerated cells beyond the bad-band threshold
    far: usize,
    /// Sum of distances to every crossed cell
    distance_sum: f64,
}

/// The line-selection engine.
///
/// Borrowing the graph keeps the candidate pool immutable for the whole run;
/// all mutable state lives in the `&mut Grid` handed to [`run`](Self::run)
/// and in the run-local line table.
///
/// # Example
///
/// ```
/// use string_art::{ColorSample, EndpointGraph, Grid, LineSynthesizer, SynthOptions};
///
/// let samples = vec![Some(ColorSample::rgb(0, 0, 0)); 4];
/// let mut grid = Grid::from_samples(2, 2, 10.0, &samples, 10.0).unwrap();
/// let graph = EndpointGraph::perimeter(grid.columns(), grid.rows(), grid.cell_size());
///
/// let synthesis = LineSynthesizer::new(&graph, SynthOptions::new()).run(&mut grid);
/// assert!(!synthesis.lines.is_empty());
/// assert!(grid.cells().all(|cell| cell.passes <= cell.maximum_passes));
/// ```
pub struct LineSynthesizer<'g> {
    graph: &'g EndpointGraph,
    options: SynthOptions,
}

impl<'g> LineSynthesizer<'g> {
    /// Create a synthesizer over a fixed candidate pool.
    pub fn new(graph: &'g EndpointGraph, options: SynthOptions) -> Self {
        Self { graph, options }
    }

    /// Options in effect.
    #[inline]
    pub fn options(&self) -> &SynthOptions {
        &self.options
    }

    /// Sweep until every driving cell met its budget or the sweep cap is hit.
    ///
    /// Exhausting the cap is not an error: the lines accepted so far are
    /// returned and the unmet budget is reported as `residual_deficit`.
    pub fn run(&self, grid: &mut Grid) -> Synthesis {
        let order = self.sweep_order(grid);
        let mut lines = Vec::new();
        let mut accepted: HashSet<PairId> = HashSet::new();
        let mut sweeps = 0;

        while sweeps < self.options.max_sweeps {
            sweeps += 1;
            let mut deficit = 0u64;
            for &index in &order {
                let cell = grid.cell(index);
                if cell.passes < cell.desired_passes {
                    deficit += cell.deficit() as u64;
                    if let Some(line) = self.fit_cell(grid, index, &accepted) {
                        accepted.insert(line.id);
                        lines.push(line);
                    }
                }
            }

            if deficit == 0 {
                break;
            }
            tracing::debug!(
                sweep = sweeps,
                remaining = deficit,
                lines = lines.len(),
                "Sweep finished"
            );
        }

        let residual_deficit: u64 = order
            .iter()
            .map(|&i| grid.cell(i).deficit() as u64)
            .sum();
        let report = SynthesisReport {
            sweeps,
            residual_deficit,
            converged: residual_deficit == 0,
            accepted: lines.len(),
            retained: lines.len(),
            candidates: self.graph.candidates().len(),
        };

        if report.converged {
            tracing::info!(sweeps, lines = report.accepted, "Line synthesis converged");
        } else {
            tracing::warn!(
                sweeps,
                residual_deficit,
                lines = report.accepted,
                "Sweep budget exhausted before all ink budgets were met"
            );
        }

        Synthesis { lines, report }
    }

    /// Driving-cell visit order for this grid.
    fn sweep_order(&self, grid: &Grid) -> Vec<usize> {
        match self.options.sweep_order {
            SweepOrder::Grid => (0..grid.len()).collect(),
            SweepOrder::LayerDescending => {
                let mut order: Vec<usize> = (0..grid.len())
                    .filter(|&i| !grid.cell(i).reserve_white)
                    .collect();
                // Stable, so equal layers keep insertion order
                order.sort_by_key(|&i| Reverse(grid.cell(i).layer));
                order
            }
        }
    }

    /// Scan the pool once for cell `entry`, accepting at most one line.
    fn fit_cell(
        &self,
        grid: &mut Grid,
        entry: usize,
        accepted: &HashSet<PairId>,
    ) -> Option<Line> {
        let pool = self.graph.candidates();
        if pool.is_empty() || !grid.cell(entry).wants_ink() {
            return None;
        }

        let start = (grid.cell(entry).last_index + 1) as usize % pool.len();
        for step in 0..pool.len() {
            let position = (start + step) % pool.len();
            let candidate = &pool[position];
            if accepted.contains(&candidate.id) {
                continue;
            }

            let (p1, p2) = self.graph.segment(candidate);
            if !grid.crosses_cell(entry, p1, p2) {
                continue;
            }
            let crossed = grid.intersected_cells(p1, p2);
            if crossed.is_empty() {
                continue;
            }

            let verdict = self.score(grid, entry, &crossed);
            if verdict.bad > 0 {
                continue;
            }

            return Some(self.accept(grid, entry, position, candidate, &crossed, verdict));
        }

        None
    }

    /// Classify every crossed cell against the driving cell.
    fn score(&self, grid: &Grid, entry: usize, crossed: &[usize]) -> Verdict {
        let entry_lab = grid.cell(entry).lab;
        let mut verdict = Verdict::default();

        for &index in crossed {
            if index == entry {
                verdict.good.push(index);
                continue;
            }

            let cell = grid.cell(index);
            let distance = entry_lab.distance(cell.lab);
            verdict.distance_sum += distance;

            if distance < self.options.good_delta_e {
                verdict.good.push(index);
            } else if cell.at_cap_after_next() {
                // Both the middle band and the far band are refused only by the cap
                verdict.bad += 1;
            } else if distance > self.options.bad_delta_e {
                verdict.far += 1;
            }
        }

        verdict
    }

    fn accept(
        &self,
        grid: &mut Grid,
        entry: usize,
        position: usize,
        candidate: &Candidate,
        crossed: &[usize],
        verdict: Verdict,
    ) -> Line {
        let (p1, p2) = self.graph.segment(candidate);
        let source = grid.cell(entry);
        let line = Line {
            id: candidate.id,
            candidate_index: position,
            p1,
            p2,
            color: source.color.to_bytes(),
            source: source.key,
            rank: verdict.distance_sum / crossed.len() as f64,
            crossings: crossed.len(),
            far_crossings: verdict.far,
        };

        grid.cell_mut(entry).last_index = position as isize;
        for index in verdict.good {
            grid.cell_mut(index).credit_pass();
        }

        tracing::trace!(
            line = %line.id,
            source = %line.source,
            rank = line.rank,
            "Accepted line"
        );
        line
    }
}
