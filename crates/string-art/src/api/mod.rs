//! Public API for the string-art crate.
//!
//! This module provides the high-level API: the [`StringArt`] builder and
//! the [`StringArtError`] error type.

mod builder;
mod error;

pub use builder::{Artwork, StringArt};
pub use error::StringArtError;
