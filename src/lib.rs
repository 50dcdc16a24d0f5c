//! threadart - string-art style line drawings
//!
//! Samples a raster image into a grid of averaged colors, runs the
//! `string-art` line synthesizer over it and serializes the result as SVG,
//! PNG or JSON. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod sampling;
pub mod services;
