//! Unified error type for the string-art public API.
//!
//! Only malformed input is an error. Duplicate cells, an empty candidate
//! pool and an exhausted sweep budget are steady-state outcomes and are
//! reported through logs and [`SynthesisReport`](crate::SynthesisReport).

use thiserror::Error;

/// Errors raised while building a grid from color samples.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StringArtError {
    /// A color sample had the wrong number of channels.
    #[error("invalid color sample: expected 3 or 4 channels, got {channels}")]
    InvalidChannelCount {
        /// Number of channels supplied
        channels: usize,
    },

    /// A channel value was not a finite number in 0..=255.
    #[error("invalid color sample: channel {index} has value {value}, expected 0..=255")]
    InvalidChannelValue {
        /// Channel position (0 = red, 3 = alpha)
        index: usize,
        /// Offending value
        value: f64,
    },

    /// The sample slice does not cover the grid.
    #[error("grid shape mismatch: {columns}x{rows} grid needs {expected} samples, got {actual}")]
    GridShape {
        /// Grid columns
        columns: u32,
        /// Grid rows
        rows: u32,
        /// `columns * rows`
        expected: usize,
        /// Samples supplied
        actual: usize,
    },

    /// Cells must have a positive pixel size.
    #[error("invalid cell size: {0}")]
    InvalidCellSize(f64),

    /// The ink-budget scaler was negative, non-finite or above the ceiling.
    #[error("invalid passes scaler: {value}, expected 0..={max}")]
    InvalidPassesScaler {
        /// Offending value
        value: f64,
        /// Largest accepted value
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_message() {
        let error = StringArtError::InvalidChannelCount { channels: 2 };
        assert_eq!(
            error.to_string(),
            "invalid color sample: expected 3 or 4 channels, got 2"
        );
    }

    #[test]
    fn test_channel_value_message() {
        let error = StringArtError::InvalidChannelValue {
            index: 1,
            value: 300.0,
        };
        assert_eq!(
            error.to_string(),
            "invalid color sample: channel 1 has value 300, expected 0..=255"
        );
    }

    #[test]
    fn test_grid_shape_message() {
        let error = StringArtError::GridShape {
            columns: 2,
            rows: 3,
            expected: 6,
            actual: 5,
        };
        assert_eq!(
            error.to_string(),
            "grid shape mismatch: 2x3 grid needs 6 samples, got 5"
        );
    }

    #[test]
    fn test_passes_scaler_message() {
        let error = StringArtError::InvalidPassesScaler {
            value: -1.0,
            max: 10000.0,
        };
        assert_eq!(
            error.to_string(),
            "invalid passes scaler: -1, expected 0..=10000"
        );
    }
}
