//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! The LMS cone transform is defined on linear light.

use super::gamma::{delinearize, linearize};
use super::srgb::Srgb;

/// A color in linear RGB color space.
///
/// Values are in 0.0..=1.0 when decoded from an 8-bit sample, but may leave
/// that range after a deficiency simulation pushes a color out of gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Gamma-encode each channel to the 0..255 scale, unclamped.
    #[inline]
    pub fn to_encoded(self) -> [f64; 3] {
        [delinearize(self.r), delinearize(self.g), delinearize(self.b)]
    }
}

impl From<Srgb> for LinearRgb {
    /// Convert from 8-bit sRGB to linear RGB using the gamma lookup table.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: linearize(srgb.r),
            g: linearize(srgb.g),
            b: linearize(srgb.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_and_white() {
        assert_eq!(
            LinearRgb::from(Srgb::new(0, 0, 0)),
            LinearRgb::new(0.0, 0.0, 0.0)
        );
        assert_eq!(
            LinearRgb::from(Srgb::new(255, 255, 255)),
            LinearRgb::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_gamma_compresses_mid_tones() {
        let linear = LinearRgb::from(Srgb::new(128, 128, 128));
        assert!(linear.r < 128.0 / 255.0);
    }

    #[test]
    fn test_to_encoded_keeps_out_of_gamut_values() {
        let encoded = LinearRgb::new(-0.1, 0.5, 1.2).to_encoded();
        assert!(encoded[0] < 0.0);
        assert!(encoded[1] > 0.0 && encoded[1] < 255.0);
        assert!(encoded[2] > 255.0);
    }
}
