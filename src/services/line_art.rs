use std::time::Instant;

use string_art::{Artwork, CellMetric, Grid};

use crate::error::PipelineError;
use crate::models::{ArtConfig, ArtworkExport, LayerSummary, StatsReport};
use crate::rendering::{line_art_svg, pixelize_svg, LineArtStyle, SvgRenderer};
use crate::sampling::{decode_png, sample_grid, RgbaImage, SampledGrid};

/// Result of a line-art run
pub struct LineArtOutput {
    /// Box-averaged input grid
    pub sampled: SampledGrid,
    /// Cells, endpoint graph and pruned lines
    pub artwork: Artwork,
    /// Rendered SVG document
    pub svg: String,
}

impl LineArtOutput {
    /// Document width in pixels
    pub fn width(&self) -> f64 {
        self.sampled.columns as f64 * self.sampled.cell_size as f64
    }

    /// Document height in pixels
    pub fn height(&self) -> f64 {
        self.sampled.rows as f64 * self.sampled.cell_size as f64
    }

    /// JSON-ready view of the retained lines and run counters
    pub fn export(&self) -> ArtworkExport {
        ArtworkExport::new(
            self.sampled.columns,
            self.sampled.rows,
            self.sampled.cell_size as f64,
            &self.artwork.synthesis,
        )
    }
}

/// Result of a pixelize run
pub struct PixelizeOutput {
    pub sampled: SampledGrid,
    pub svg: String,
}

/// Pipeline that orchestrates sample → synthesize → serialize
pub struct LineArtPipeline {
    config: ArtConfig,
    renderer: SvgRenderer,
}

impl LineArtPipeline {
    pub fn new(config: ArtConfig) -> Self {
        Self {
            config,
            renderer: SvgRenderer::new(),
        }
    }

    /// Get the config
    pub fn config(&self) -> &ArtConfig {
        &self.config
    }

    /// Decode and sample PNG bytes at the configured grid resolution
    pub fn sample(&self, png_data: &[u8]) -> Result<SampledGrid, PipelineError> {
        let image = decode_png(png_data)?;
        self.sample_image(&image)
    }

    /// Sample an already decoded image
    pub fn sample_image(&self, image: &RgbaImage) -> Result<SampledGrid, PipelineError> {
        Ok(sample_grid(image, self.config.columns, self.config.rows)?)
    }

    /// Generate line art for PNG bytes
    pub fn generate(&self, png_data: &[u8]) -> Result<LineArtOutput, PipelineError> {
        let sampled = self.sample(png_data)?;
        self.generate_from_samples(sampled)
    }

    /// Generate line art for an already sampled grid
    pub fn generate_from_samples(
        &self,
        sampled: SampledGrid,
    ) -> Result<LineArtOutput, PipelineError> {
        let started = Instant::now();
        let artwork = self.config.string_art().render(
            sampled.columns,
            sampled.rows,
            sampled.cell_size as f64,
            &sampled.samples,
        )?;

        let report = artwork.synthesis.report;
        tracing::info!(
            columns = sampled.columns,
            rows = sampled.rows,
            sweeps = report.sweeps,
            accepted = report.accepted,
            retained = report.retained,
            residual_deficit = report.residual_deficit,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Line synthesis finished"
        );

        let style = LineArtStyle {
            stroke_width: self.config.stroke_width,
            draw_endpoints: self.config.draw_endpoints,
        };
        let svg = line_art_svg(
            sampled.columns as f64 * sampled.cell_size as f64,
            sampled.rows as f64 * sampled.cell_size as f64,
            &artwork.synthesis.lines,
            artwork.graph.endpoints(),
            &style,
        )?;

        tracing::debug!(svg_len = svg.len(), "Line art SVG rendered");
        Ok(LineArtOutput {
            sampled,
            artwork,
            svg,
        })
    }

    /// Mosaic of the sampled grid, one unit square per cell
    pub fn pixelize(&self, png_data: &[u8]) -> Result<PixelizeOutput, PipelineError> {
        let sampled = self.sample(png_data)?;
        let svg = pixelize_svg(&sampled)?;
        Ok(PixelizeOutput { sampled, svg })
    }

    /// Rasterize an SVG document at the configured scale
    pub fn to_png(&self, svg: &str) -> Result<Vec<u8>, PipelineError> {
        Ok(self
            .renderer
            .render_to_png(svg.as_bytes(), self.config.png_scale)?)
    }

    /// Per-layer statistics of the cell grid built from PNG bytes
    pub fn stats(&self, png_data: &[u8]) -> Result<StatsReport, PipelineError> {
        let sampled = self.sample(png_data)?;
        let grid = Grid::from_samples(
            sampled.columns,
            sampled.rows,
            sampled.cell_size as f64,
            &sampled.samples,
            self.config.passes_scaler,
        )?;

        let layers = grid
            .layer_collections(CellMetric::DeltaEWhite)
            .iter()
            .map(|(&layer, collection)| LayerSummary::new(layer, collection))
            .collect();

        Ok(StatsReport {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_size: grid.cell_size(),
            cells: grid.len(),
            reserve_white: grid.cells().filter(|cell| cell.reserve_white).count(),
            total_desired_passes: grid.cells().map(|cell| cell.desired_passes as u64).sum(),
            layers,
        })
    }
}
