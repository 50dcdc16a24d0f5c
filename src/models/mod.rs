pub mod config;
pub mod export;

pub use config::{ArtConfig, SweepOrderSetting};
pub use export::{ArtworkExport, LayerSummary, LineRecord, ReportRecord, StatsReport};
