use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use threadart::models::{ArtConfig, SweepOrderSetting};
use threadart::services::LineArtPipeline;

/// Config file picked up from the working directory when `--config` is absent
const DEFAULT_CONFIG_FILE: &str = "art.yaml";

#[derive(Parser)]
#[command(name = "threadart")]
#[command(about = "String-art style line drawings from raster images")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize line art from a PNG
    Lines {
        /// Input PNG file
        input: PathBuf,

        /// Output SVG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a rasterized PNG
        #[arg(long)]
        png: Option<PathBuf>,

        /// Also write the retained lines and run report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Keep at most this many lines (never fewer than min-lines)
        #[arg(long)]
        max_lines: Option<usize>,

        /// Drop lines ranked worse than this
        #[arg(long)]
        max_rank: Option<f64>,

        /// Sweep budget
        #[arg(long)]
        max_sweeps: Option<usize>,

        /// Visit cells farthest from white first
        #[arg(long)]
        layered: bool,

        /// Draw the perimeter endpoints
        #[arg(long)]
        endpoints: bool,
    },
    /// Write the sampled grid as a mosaic SVG
    Pixelize {
        /// Input PNG file
        input: PathBuf,

        /// Output SVG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Also write a rasterized PNG
        #[arg(long)]
        png: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
    /// Print per-layer cell statistics as JSON
    Stats {
        /// Input PNG file
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Args)]
struct GridArgs {
    /// YAML config file (default: ./art.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target grid columns
    #[arg(long)]
    columns: Option<u32>,

    /// Target grid rows
    #[arg(long)]
    rows: Option<u32>,
}

impl GridArgs {
    fn load_config(&self) -> anyhow::Result<ArtConfig> {
        let mut config = match &self.config {
            Some(path) => ArtConfig::from_path(path)?,
            None => ArtConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
        };
        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadart=info,string_art=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Lines {
            input,
            output,
            png,
            json,
            grid,
            max_lines,
            max_rank,
            max_sweeps,
            layered,
            endpoints,
        } => {
            let mut config = grid.load_config()?;
            if max_lines.is_some() {
                config.max_lines = max_lines;
            }
            if max_rank.is_some() {
                config.max_rank = max_rank;
            }
            if let Some(sweeps) = max_sweeps {
                config.max_sweeps = sweeps;
            }
            if layered {
                config.sweep_order = SweepOrderSetting::LayerDescending;
            }
            if endpoints {
                config.draw_endpoints = true;
            }
            run_lines_command(config, &input, &output, png.as_deref(), json.as_deref())
        }
        Commands::Pixelize {
            input,
            output,
            png,
            grid,
        } => run_pixelize_command(grid.load_config()?, &input, &output, png.as_deref()),
        Commands::Stats { input, grid } => run_stats_command(grid.load_config()?, &input),
    }
}

fn read_input(input: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn write_output(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = data.len(), "Wrote output");
    Ok(())
}

/// Synthesize line art and write SVG (+ optional PNG / JSON)
fn run_lines_command(
    config: ArtConfig,
    input: &Path,
    output: &Path,
    png: Option<&Path>,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = LineArtPipeline::new(config);
    let result = pipeline.generate(&read_input(input)?)?;

    write_output(output, result.svg.as_bytes())?;
    if let Some(path) = png {
        write_output(path, &pipeline.to_png(&result.svg)?)?;
    }
    if let Some(path) = json {
        let document = result.export().to_json()?;
        write_output(path, document.as_bytes())?;
    }

    let report = result.artwork.synthesis.report;
    if !report.converged {
        tracing::warn!(
            residual_deficit = report.residual_deficit,
            "Some cells did not receive all requested passes"
        );
    }
    Ok(())
}

/// Write the sampled grid as a mosaic SVG (+ optional PNG)
fn run_pixelize_command(
    config: ArtConfig,
    input: &Path,
    output: &Path,
    png: Option<&Path>,
) -> anyhow::Result<()> {
    let pipeline = LineArtPipeline::new(config);
    let result = pipeline.pixelize(&read_input(input)?)?;

    write_output(output, result.svg.as_bytes())?;
    if let Some(path) = png {
        write_output(path, &pipeline.to_png(&result.svg)?)?;
    }
    Ok(())
}

/// Print per-layer statistics to stdout
fn run_stats_command(config: ArtConfig, input: &Path) -> anyhow::Result<()> {
    let pipeline = LineArtPipeline::new(config);
    let report = pipeline.stats(&read_input(input)?)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
