//! Line synthesis
//!
//! [`LineSynthesizer`] selects lines; [`rank_and_prune`] orders and trims
//! them for rendering.

mod engine;
mod line;
mod options;
mod prune;

pub use engine::{LineSynthesizer, Synthesis, SynthesisReport};
pub use line::Line;
pub use options::{
    PruneOptions, SweepOrder, SynthOptions, DEFAULT_BAD_DELTA_E, DEFAULT_GOOD_DELTA_E,
    DEFAULT_MAX_SWEEPS, DEFAULT_MIN_LINES,
};
pub use prune::rank_and_prune;
