//! string-art: greedy line synthesis for string-art style drawings
//!
//! The crate turns a grid of averaged cell colors into an ordered list of
//! straight segments between fixed perimeter anchors. Drawn on top of each
//! other, the segments approximate the darkness and hue of every cell.
//!
//! # Quick Start
//!
//! The [`StringArt`] builder is the primary entry point:
//!
//! ```
//! use string_art::{ColorSample, StringArt};
//!
//! let black = Some(ColorSample::rgb(0, 0, 0));
//! let white = Some(ColorSample::rgb(255, 255, 255));
//!
//! let artwork = StringArt::new()
//!     .render(2, 2, 32.0, &[black, white, white, black])
//!     .unwrap();
//!
//! for line in &artwork.synthesis.lines {
//!     println!("{} rank {:.1}", line.id, line.rank);
//! }
//! ```
//!
//! # Building Blocks
//!
//! - [`Grid`] / [`Cell`]: per-position color, ink budget and pass state
//! - [`EndpointGraph`]: perimeter anchors and the frozen candidate pool
//! - [`geometry`]: segment intersection and the column-then-cell filter
//! - [`LineSynthesizer`]: the sweep loop
//! - [`rank_and_prune`]: best-first ordering and readability bounds
//! - [`CellCollection`]: per-layer statistics for diagnostics
//!
//! # Ink Budget
//!
//! A cell asks for `round((1 - luminance) * passes_scaler)` passes, where
//! luminance is Rec. 601 on normalized channels. Cells lighter than Lab
//! L 95 and fully transparent cells ask for none. A pass is credited
//! whenever an accepted line crosses the cell and the cell's color is within
//! the good delta-E band of the line's driving cell. Credits never push a
//! cell past `maximum_passes` (`2 * desired + 4`, or 100 when transparent).
//!
//! # Determinism
//!
//! Given the same samples and options, two runs produce identical line
//! lists. The candidate pool, the grid insertion order and the sweep order
//! are all fixed by construction.

pub mod api;
pub mod color;
pub mod endpoints;
pub mod geometry;
pub mod grid;
pub mod synth;


pub use api::{Artwork, StringArt, StringArtError};
pub use color::{ColorSample, Lab};
pub use endpoints::{Candidate, EdgeFlags, Endpoint, EndpointGraph, PairId};
pub use geometry::{GridGeometry, Point};
pub use grid::{Cell, CellCollection, CellKey, CellMetric, CollectionStats, Grid};
pub use synth::{
    rank_and_prune, Line, LineSynthesizer, PruneOptions, SweepOrder, SynthOptions, Synthesis,
    SynthesisReport,
};
