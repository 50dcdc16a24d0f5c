//! Color types and conversion utilities
//!
//! - [`ColorSample`]: averaged sRGB (+ optional alpha) value of one grid cell
//! - [`Lab`]: CIE L*a*b* coordinates used for perceptual distance
//!
//! # Example
//!
//! ```
//! use string_art::{ColorSample, Lab};
//!
//! let sample = ColorSample::rgb(30, 30, 30);
//! let lab = Lab::from(sample);
//! assert!(lab.distance(Lab::WHITE) > 80.0);
//! ```

mod lab;
mod sample;

pub use lab::Lab;
pub use sample::ColorSample;
