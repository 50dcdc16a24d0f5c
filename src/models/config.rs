use serde::{Deserialize, Serialize};
use std::path::Path;
use string_art::{PruneOptions, StringArt, SweepOrder, SynthOptions};

use crate::error::ConfigError;

/// Run configuration loaded from an `art.yaml` file.
///
/// Every field is optional in the file; CLI flags override file values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArtConfig {
    /// Target number of grid columns
    #[serde(default = "default_grid")]
    pub columns: u32,

    /// Target number of grid rows
    #[serde(default = "default_grid")]
    pub rows: u32,

    /// Passes requested by a fully black cell
    #[serde(default = "default_passes_scaler")]
    pub passes_scaler: f64,

    /// Delta-E below which a crossed cell counts as a good hit
    #[serde(default = "default_good_delta_e")]
    pub good_delta_e: f64,

    /// Delta-E above which a crossed cell is in the far band
    #[serde(default = "default_bad_delta_e")]
    pub bad_delta_e: f64,

    /// Sweep budget
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,

    /// Driving-cell visit order
    #[serde(default)]
    pub sweep_order: SweepOrderSetting,

    /// Drop lines ranked worse than this
    #[serde(default)]
    pub max_rank: Option<f64>,

    /// Keep at most this many lines
    #[serde(default)]
    pub max_lines: Option<usize>,

    /// Floor applied to `max_lines`
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// Stroke width of drawn lines in pixels
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Draw the perimeter endpoints as small circles
    #[serde(default)]
    pub draw_endpoints: bool,

    /// Scale applied when rasterizing to PNG
    #[serde(default = "default_png_scale")]
    pub png_scale: f32,
}

/// Serializable mirror of [`SweepOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepOrderSetting {
    #[default]
    Grid,
    LayerDescending,
}

impl From<SweepOrderSetting> for SweepOrder {
    fn from(setting: SweepOrderSetting) -> Self {
        match setting {
            SweepOrderSetting::Grid => SweepOrder::Grid,
            SweepOrderSetting::LayerDescending => SweepOrder::LayerDescending,
        }
    }
}

fn default_grid() -> u32 {
    32
}

fn default_passes_scaler() -> f64 {
    10.0
}

fn default_good_delta_e() -> f64 {
    string_art::synth::DEFAULT_GOOD_DELTA_E
}

fn default_bad_delta_e() -> f64 {
    string_art::synth::DEFAULT_BAD_DELTA_E
}

fn default_max_sweeps() -> usize {
    string_art::synth::DEFAULT_MAX_SWEEPS
}

fn default_min_lines() -> usize {
    string_art::synth::DEFAULT_MIN_LINES
}

fn default_stroke_width() -> f64 {
    1.0
}

fn default_png_scale() -> f32 {
    1.0
}

impl Default for ArtConfig {
    fn default() -> Self {
        Self {
            columns: default_grid(),
            rows: default_grid(),
            passes_scaler: default_passes_scaler(),
            good_delta_e: default_good_delta_e(),
            bad_delta_e: default_bad_delta_e(),
            max_sweeps: default_max_sweeps(),
            sweep_order: SweepOrderSetting::default(),
            max_rank: None,
            max_lines: None,
            min_lines: default_min_lines(),
            stroke_width: default_stroke_width(),
            draw_endpoints: false,
            png_scale: default_png_scale(),
        }
    }
}

impl ArtConfig {
    /// Load configuration from an explicitly requested file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            columns = config.columns,
            rows = config.rows,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load configuration from an optional default location.
    ///
    /// A missing or unreadable file falls back to defaults with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(%e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Synthesis options described by this config.
    pub fn synth_options(&self) -> SynthOptions {
        SynthOptions::new()
            .good_delta_e(self.good_delta_e)
            .bad_delta_e(self.bad_delta_e)
            .max_sweeps(self.max_sweeps)
            .sweep_order(self.sweep_order.into())
    }

    /// Pruning options described by this config.
    pub fn prune_options(&self) -> PruneOptions {
        let mut options = PruneOptions::new().min_lines(self.min_lines);
        if let Some(rank) = self.max_rank {
            options = options.max_rank(rank);
        }
        if let Some(lines) = self.max_lines {
            options = options.max_lines(lines);
        }
        options
    }

    /// A ready-to-run builder for this config.
    pub fn string_art(&self) -> StringArt {
        StringArt::new()
            .passes_scaler(self.passes_scaler)
            .synth_options(self.synth_options())
            .prune_options(self.prune_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = ArtConfig::default();

        assert_eq!(config.columns, 32);
        assert_eq!(config.rows, 32);
        assert_eq!(config.passes_scaler, 10.0);
        assert_eq!(config.good_delta_e, 10.0);
        assert_eq!(config.bad_delta_e, 100.0);
        assert_eq!(config.max_sweeps, 1000);
        assert_eq!(config.min_lines, 100);
        assert_eq!(config.sweep_order, SweepOrderSetting::Grid);
        assert!(!config.draw_endpoints);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config: ArtConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ArtConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
columns: 48
rows: 24
sweep_order: layer-descending
max_rank: 25.5
max_lines: 400
min_lines: 50
draw_endpoints: true
"#;

        let config: ArtConfig = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.columns, 48);
        assert_eq!(config.rows, 24);
        assert_eq!(config.sweep_order, SweepOrderSetting::LayerDescending);
        assert_eq!(config.max_rank, Some(25.5));
        assert_eq!(config.max_lines, Some(400));
        assert!(config.draw_endpoints);
        // Untouched fields keep their defaults
        assert_eq!(config.max_sweeps, 1000);
    }

    #[test]
    fn test_unknown_sweep_order_rejected() {
        let result: Result<ArtConfig, _> = serde_yaml::from_str("sweep_order: spiral");
        assert!(result.is_err());
    }

    #[test]
    fn test_options_mapping() {
        let config = ArtConfig {
            good_delta_e: 5.0,
            max_sweeps: 12,
            sweep_order: SweepOrderSetting::LayerDescending,
            max_lines: Some(10),
            min_lines: 4,
            ..Default::default()
        };

        let synth = config.synth_options();
        assert_eq!(synth.good_delta_e, 5.0);
        assert_eq!(synth.max_sweeps, 12);
        assert_eq!(synth.sweep_order, SweepOrder::LayerDescending);

        let prune = config.prune_options();
        assert_eq!(prune.max_rank, None);
        assert_eq!(prune.effective_max_lines(), Some(10));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ArtConfig::load_or_default(Path::new("/nonexistent/art.yaml"));
        assert_eq!(config, ArtConfig::default());
    }
}
