//! CIE L*a*b* color space
//!
//! Lab is used for every perceptual comparison in the synthesizer: how close
//! a crossed cell is to the driving cell, and how far a cell is from white.
//! Distances are plain Euclidean distances (CIE76 delta-E).

use super::sample::ColorSample;

/// D65 reference white, 2° observer.
const REF_X: f64 = 95.047;
const REF_Y: f64 = 100.0;
const REF_Z: f64 = 108.883;

/// A color in CIE L*a*b* space.
///
/// - `l`: Lightness (0.0 = black, 100.0 = white)
/// - `a`: Green-red axis
/// - `b`: Blue-yellow axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    /// Lightness: 0.0 (black) to 100.0 (white)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    /// Pure white, the reference point for layering.
    pub const WHITE: Lab = Lab {
        l: 100.0,
        a: 0.0,
        b: 0.0,
    };

    /// Create a new Lab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Euclidean distance in Lab space (CIE76 delta-E).
    ///
    /// # Example
    ///
    /// ```
    /// use string_art::Lab;
    ///
    /// let black = Lab::new(0.0, 0.0, 0.0);
    /// assert_eq!(Lab::WHITE.distance(Lab::WHITE), 0.0);
    /// assert_eq!(black.distance(Lab::WHITE), 100.0);
    /// ```
    #[inline]
    pub fn distance(self, other: Lab) -> f64 {
        let dl = other.l - self.l;
        let da = other.a - self.a;
        let db = other.b - self.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

/// sRGB gamma decode of a normalized channel.
#[inline]
fn linearize(value: f64) -> f64 {
    if value > 0.04045 {
        ((value + 0.055) / 1.055).powf(2.4)
    } else {
        value / 12.92
    }
}

/// Lab companding of a white-normalized XYZ component.
#[inline]
fn compand(value: f64) -> f64 {
    if value > 0.008856 {
        value.cbrt()
    } else {
        7.787 * value + 16.0 / 116.0
    }
}

impl From<ColorSample> for Lab {
    /// sRGB → linear → XYZ → Lab. Alpha is ignored.
    fn from(sample: ColorSample) -> Self {
        let r = linearize(sample.r / 255.0) * 100.0;
        let g = linearize(sample.g / 255.0) * 100.0;
        let b = linearize(sample.b / 255.0) * 100.0;

        let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
        let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
        let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

        let fx = compand(x / REF_X);
        let fy = compand(y / REF_Y);
        let fz = compand(z / REF_Z);

        Lab {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }
}
