use serde::{Deserialize, Serialize};
use string_art::{CellCollection, Line, Synthesis, SynthesisReport};

/// One drawn line, as consumed by external renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Pair id, `x1_y1_x2_y2` in grid-corner coordinates
    pub id: String,
    pub p1: [f64; 2],
    pub p2: [f64; 2],
    pub rgb: [u8; 3],
    pub rank: f64,
}

impl From<&Line> for LineRecord {
    fn from(line: &Line) -> Self {
        Self {
            id: line.id.to_string(),
            p1: [line.p1.x, line.p1.y],
            p2: [line.p2.x, line.p2.y],
            rgb: line.color,
            rank: line.rank,
        }
    }
}

/// Run counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub sweeps: usize,
    pub residual_deficit: u64,
    pub converged: bool,
    pub accepted: usize,
    pub retained: usize,
    pub candidates: usize,
}

impl From<SynthesisReport> for ReportRecord {
    fn from(report: SynthesisReport) -> Self {
        Self {
            sweeps: report.sweeps,
            residual_deficit: report.residual_deficit,
            converged: report.converged,
            accepted: report.accepted,
            retained: report.retained,
            candidates: report.candidates,
        }
    }
}

/// JSON document written by `threadart lines --json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkExport {
    pub width: f64,
    pub height: f64,
    pub columns: u32,
    pub rows: u32,
    pub cell_size: f64,
    pub report: ReportRecord,
    pub lines: Vec<LineRecord>,
}

impl ArtworkExport {
    pub fn new(columns: u32, rows: u32, cell_size: f64, synthesis: &Synthesis) -> Self {
        Self {
            width: columns as f64 * cell_size,
            height: rows as f64 * cell_size,
            columns,
            rows,
            cell_size,
            report: synthesis.report.into(),
            lines: synthesis.lines.iter().map(LineRecord::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Statistics of one delta-E layer, as printed by `threadart stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub layer: u32,
    pub total: usize,
    pub transparent_ratio: f64,
    pub white_ratio: f64,
    pub minimum: Option<f64>,
    pub median: Option<f64>,
    pub maximum: Option<f64>,
    pub median_abs_deviation: f64,
}

impl LayerSummary {
    pub fn new(layer: u32, collection: &CellCollection<'_>) -> Self {
        let stats = collection.stats();
        Self {
            layer,
            total: stats.total,
            transparent_ratio: stats.transparent_ratio,
            white_ratio: stats.white_ratio,
            minimum: stats.minimum.map(|item| item.value),
            median: stats.median.map(|item| item.value),
            maximum: stats.maximum.map(|item| item.value),
            median_abs_deviation: stats.median_abs_deviation,
        }
    }
}

/// Grid overview printed by `threadart stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub columns: u32,
    pub rows: u32,
    pub cell_size: f64,
    pub cells: usize,
    /// Cells kept out of layering because they are close to white
    pub reserve_white: usize,
    /// Passes requested across all cells
    pub total_desired_passes: u64,
    pub layers: Vec<LayerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use string_art::{CellKey, CellMetric, ColorSample, Grid, PairId, Point};

    fn sample_line() -> Line {
        Line {
            id: PairId {
                from: (0, 1),
                to: (3, 0),
            },
            candidate_index: 4,
            p1: Point::new(0.0, 8.0),
            p2: Point::new(24.0, 0.0),
            color: [12, 34, 56],
            source: CellKey::new(1, 0),
            rank: 3.5,
            crossings: 3,
            far_crossings: 0,
        }
    }

    #[test]
    fn test_line_record_from_line() {
        let record = LineRecord::from(&sample_line());
        assert_eq!(record.id, "0_1_3_0");
        assert_eq!(record.p1, [0.0, 8.0]);
        assert_eq!(record.p2, [24.0, 0.0]);
        assert_eq!(record.rgb, [12, 34, 56]);
        assert_eq!(record.rank, 3.5);
    }

    #[test]
    fn test_export_json_shape() {
        let synthesis = Synthesis {
            lines: vec![sample_line()],
            report: SynthesisReport {
                sweeps: 2,
                accepted: 1,
                retained: 1,
                candidates: 20,
                ..Default::default()
            },
        };
        let export = ArtworkExport::new(3, 2, 8.0, &synthesis);
        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();

        assert_eq!(value["width"], 24.0);
        assert_eq!(value["height"], 16.0);
        assert_eq!(value["report"]["sweeps"], 2);
        assert_eq!(value["lines"][0]["id"], "0_1_3_0");
        assert_eq!(value["lines"][0]["rgb"][2], 56);
    }

    #[test]
    fn test_layer_summary() {
        let samples = vec![
            Some(ColorSample::rgb(0, 0, 0)),
            Some(ColorSample::rgb(10, 10, 10)),
            Some(ColorSample::rgba(0, 0, 0, 0)),
        ];
        let grid = Grid::from_samples(3, 1, 8.0, &samples, 10.0).unwrap();
        let layers = grid.layer_collections(CellMetric::DeltaEWhite);
        let (&layer, collection) = layers.iter().next_back().unwrap();

        let summary = LayerSummary::new(layer, collection);
        assert_eq!(summary.layer, 5);
        assert_eq!(summary.total, 2);
        assert!(summary.minimum.unwrap() <= summary.maximum.unwrap());
    }
}
