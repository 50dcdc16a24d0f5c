//! Rank ordering and readability pruning.

use super::engine::Synthesis;
use super::line::Line;
use super::options::PruneOptions;

/// Sort lines best-first by rank and apply both pruning bounds.
///
/// The sort is stable, so equally ranked lines keep acceptance order and the
/// result stays deterministic.
pub fn rank_and_prune(mut lines: Vec<Line>, options: &PruneOptions) -> Vec<Line> {
    let produced = lines.len();
    lines.sort_by(|a, b| a.rank.total_cmp(&b.rank));

    if let Some(max_rank) = options.max_rank {
        lines.retain(|line| line.rank <= max_rank);
    }
    if let Some(limit) = options.effective_max_lines() {
        lines.truncate(limit);
    }

    if lines.len() < produced {
        tracing::debug!(produced, retained = lines.len(), "Pruned lines");
    }
    lines
}

impl Synthesis {
    /// Rank and prune this synthesis in place, updating the report.
    pub fn prune(mut self, options: &PruneOptions) -> Self {
        self.lines = rank_and_prune(self.lines, options);
        self.report.retained = self.lines.len();
        self
    }
}
