//! Sampled cell color
//!
//! A [`ColorSample`] is the averaged color of one grid cell as produced by
//! an external sampler. Channels stay in the 0..=255 range but are not
//! required to be integers, since box averaging yields fractional values.

use crate::api::StringArtError;

/// One averaged color sample with an optional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorSample {
    /// Red channel (0.0..=255.0)
    pub r: f64,
    /// Green channel (0.0..=255.0)
    pub g: f64,
    /// Blue channel (0.0..=255.0)
    pub b: f64,
    /// Alpha channel (0.0..=255.0), `None` for three-channel samples
    pub alpha: Option<f64>,
}

impl ColorSample {
    /// Create an opaque three-channel sample from 8-bit values.
    ///
    /// # Example
    /// ```
    /// use string_art::ColorSample;
    /// let black = ColorSample::rgb(0, 0, 0);
    /// assert!(!black.is_transparent());
    /// ```
    #[inline]
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            alpha: None,
        }
    }

    /// Create a four-channel sample from 8-bit values.
    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            alpha: Some(a as f64),
            ..Self::rgb(r, g, b)
        }
    }

    /// Build a sample from a raw channel slice.
    ///
    /// Accepts exactly 3 (RGB) or 4 (RGBA) channels, each a finite value in
    /// 0..=255. Anything else is malformed input.
    ///
    /// # Example
    /// ```
    /// use string_art::ColorSample;
    /// let sample = ColorSample::from_channels(&[12.5, 40.0, 200.0, 255.0]).unwrap();
    /// assert_eq!(sample.alpha, Some(255.0));
    /// assert!(ColorSample::from_channels(&[1.0, 2.0]).is_err());
    /// ```
    pub fn from_channels(channels: &[f64]) -> Result<Self, StringArtError> {
        if channels.len() != 3 && channels.len() != 4 {
            return Err(StringArtError::InvalidChannelCount {
                channels: channels.len(),
            });
        }
        let sample = Self {
            r: channels[0],
            g: channels[1],
            b: channels[2],
            alpha: channels.get(3).copied(),
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Check that every present channel is a finite value in 0..=255.
    ///
    /// Fields are public, so samples built by hand are checked again when
    /// they enter a [`Grid`](crate::Grid).
    pub fn validate(&self) -> Result<(), StringArtError> {
        let channels = [Some(self.r), Some(self.g), Some(self.b), self.alpha];
        for (index, value) in channels.into_iter().enumerate() {
            if let Some(value) = value {
                if !value.is_finite() || !(0.0..=255.0).contains(&value) {
                    return Err(StringArtError::InvalidChannelValue { index, value });
                }
            }
        }
        Ok(())
    }

    /// A sample is transparent only when it carries alpha and alpha is zero.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha == Some(0.0)
    }

    /// Perceived brightness in 0.0..=1.0 using the Rec. 601 weights.
    ///
    /// Drives the ink budget only; perceptual comparisons use [`Lab`](super::Lab).
    #[inline]
    pub fn luminance(&self) -> f64 {
        0.299 * (self.r / 255.0) + 0.587 * (self.g / 255.0) + 0.114 * (self.b / 255.0)
    }

    /// Round to an 8-bit RGB triple for output.
    #[inline]
    pub fn to_bytes(&self) -> [u8; 3] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ]
    }
}
