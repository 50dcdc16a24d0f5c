//! End-to-end tests: PNG bytes in, SVG / PNG / JSON out.

mod common;

use pretty_assertions::assert_eq;
use std::collections::HashSet;
use string_art::StringArtError;
use threadart::error::{PipelineError, SampleError};
use threadart::models::{ArtConfig, ArtworkExport};
use threadart::sampling::decode_png;
use threadart::services::LineArtPipeline;

fn config(columns: u32, rows: u32) -> ArtConfig {
    ArtConfig {
        columns,
        rows,
        max_sweeps: 100,
        ..Default::default()
    }
}

#[test]
fn test_lines_from_png() {
    let pipeline = LineArtPipeline::new(config(8, 8));
    let output = pipeline.generate(&common::diagonal_band(64)).unwrap();

    assert_eq!(output.sampled.columns, 8);
    assert_eq!(output.sampled.cell_size, 8);
    assert!(output.svg.contains(r#"width="64" height="64""#));

    let lines = &output.artwork.synthesis.lines;
    assert!(!lines.is_empty());
    let ids: HashSet<_> = lines.iter().map(|line| line.id).collect();
    assert_eq!(ids.len(), lines.len());

    for cell in output.artwork.grid.cells() {
        assert!(cell.passes <= cell.maximum_passes);
    }
}

#[test]
fn test_lines_are_deterministic() {
    let png = common::diagonal_band(48);
    let pipeline = LineArtPipeline::new(config(6, 6));
    let first = pipeline.generate(&png).unwrap();
    let second = pipeline.generate(&png).unwrap();
    assert_eq!(first.svg, second.svg);
    assert_eq!(first.export(), second.export());
}

#[test]
fn test_max_lines_prunes_output() {
    let png = common::diagonal_band(64);
    let unbounded = LineArtPipeline::new(config(8, 8)).generate(&png).unwrap();
    let total = unbounded.artwork.synthesis.lines.len();

    let bounded = LineArtPipeline::new(ArtConfig {
        max_lines: Some(1),
        min_lines: 2,
        ..config(8, 8)
    })
    .generate(&png)
    .unwrap();

    let retained = bounded.artwork.synthesis.lines.len();
    assert_eq!(retained, total.min(2));
    assert_eq!(bounded.artwork.synthesis.report.accepted, total);
    assert_eq!(bounded.svg.matches("<line").count(), retained);
}

#[test]
fn test_json_export_round_trip() {
    let output = LineArtPipeline::new(config(4, 4))
        .generate(&common::diagonal_band(32))
        .unwrap();
    let json = output.export().to_json().unwrap();
    let parsed: ArtworkExport = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.columns, 4);
    assert_eq!(parsed.width, 32.0);
    assert_eq!(parsed.lines.len(), output.artwork.synthesis.lines.len());
    let ranks: Vec<f64> = parsed.lines.iter().map(|line| line.rank).collect();
    assert!(ranks.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_transparent_half_draws_nothing_there() {
    let pipeline = LineArtPipeline::new(config(4, 2));
    let output = pipeline.generate(&common::half_transparent(16, 8)).unwrap();

    for cell in output.artwork.grid.cells() {
        if cell.key.column < 2 {
            assert!(cell.is_transparent, "cell {} should be transparent", cell.key);
            assert_eq!(cell.desired_passes, 0);
            assert_eq!(cell.maximum_passes, 100);
        }
    }
    let transparent: HashSet<_> = output
        .artwork
        .grid
        .cells()
        .filter(|cell| cell.is_transparent)
        .map(|cell| cell.key)
        .collect();
    assert!(output
        .artwork
        .synthesis
        .lines
        .iter()
        .all(|line| !transparent.contains(&line.source)));
}

#[test]
fn test_pixelize_and_png() {
    let pipeline = LineArtPipeline::new(config(4, 4));
    let output = pipeline.pixelize(&common::encode_gray(8, 8, &[0u8; 64])).unwrap();
    assert_eq!(output.svg.matches("<rect").count(), 16);
    assert!(output.svg.contains(r#"fill="rgb(0,0,0)""#));

    let png = pipeline.to_png(&output.svg).unwrap();
    let image = decode_png(&png).unwrap();
    assert_eq!((image.width, image.height), (4, 4));
    assert_eq!(&image.pixels[..4], &[0, 0, 0, 255]);
}

#[test]
fn test_stats_report() {
    let pipeline = LineArtPipeline::new(config(4, 4));
    let report = pipeline.stats(&common::diagonal_band(32)).unwrap();
    assert_eq!(report.cells, 16);
    assert!(report.reserve_white > 0);
    assert!(report.total_desired_passes > 0);
    let layers: Vec<u32> = report.layers.iter().map(|layer| layer.layer).collect();
    let mut sorted = layers.clone();
    sorted.sort();
    assert_eq!(layers, sorted);
}

#[test]
fn test_invalid_png_is_sample_error() {
    let result = LineArtPipeline::new(ArtConfig::default()).generate(b"definitely not a png");
    assert!(matches!(
        result,
        Err(PipelineError::Sample(SampleError::PngDecode(_)))
    ));
}

#[test]
fn test_oversized_passes_scaler_is_synthesis_error() {
    let pipeline = LineArtPipeline::new(ArtConfig {
        passes_scaler: 3.0e9,
        ..config(4, 4)
    });
    let result = pipeline.generate(&common::diagonal_band(32));
    assert!(matches!(
        result,
        Err(PipelineError::Synthesis(
            StringArtError::InvalidPassesScaler { .. }
        ))
    ));
}
