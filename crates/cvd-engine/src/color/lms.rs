//! LMS cone-response color space
//!
//! LMS describes a color by the response of the long-, medium- and
//! short-wavelength cones. The forward transform uses the
//! Hunt-Pointer-Estévez matrix; the inverse is its published inverse.
//! Both are exact constants and must not be re-derived or normalized.

use super::linear_rgb::LinearRgb;

/// RGB to LMS (Hunt-Pointer-Estévez), row-major.
pub const RGB_TO_LMS: [[f64; 3]; 3] = [
    [0.3904725, 0.54990437, 0.00890159],
    [0.07092586, 0.96310739, 0.00135709],
    [0.02314268, 0.12801221, 0.93624394],
];

/// LMS to RGB, the inverse of [`RGB_TO_LMS`] to published precision.
pub const LMS_TO_RGB: [[f64; 3]; 3] = [
    [2.85831110, -1.62870796, -0.02482469],
    [-0.21018126, 1.15820096, 0.00032428],
    [-0.04181125, -0.11817878, 1.06871126],
];

/// A cone-response triple. Unbounded: no clamping happens in this space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lms {
    /// Long-wavelength cone response
    pub l: f64,
    /// Medium-wavelength cone response
    pub m: f64,
    /// Short-wavelength cone response
    pub s: f64,
}

impl Lms {
    #[inline]
    pub fn new(l: f64, m: f64, s: f64) -> Self {
        Self { l, m, s }
    }

    /// Forward transform from an RGB triple.
    #[inline]
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let (l, m, s) = rgb_to_lms(r, g, b);
        Self { l, m, s }
    }

    /// Inverse transform to an RGB triple.
    #[inline]
    pub fn to_rgb(self) -> (f64, f64, f64) {
        lms_to_rgb(self.l, self.m, self.s)
    }
}

impl From<LinearRgb> for Lms {
    fn from(rgb: LinearRgb) -> Self {
        Self::from_rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Lms> for LinearRgb {
    fn from(lms: Lms) -> Self {
        let (r, g, b) = lms.to_rgb();
        Self { r, g, b }
    }
}

#[inline]
fn apply(matrix: &[[f64; 3]; 3], x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let row = |i: usize| matrix[i][0] * x + matrix[i][1] * y + matrix[i][2] * z;
    (row(0), row(1), row(2))
}

/// Apply [`RGB_TO_LMS`].
#[inline]
pub fn rgb_to_lms(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    apply(&RGB_TO_LMS, r, g, b)
}

/// Apply [`LMS_TO_RGB`].
#[inline]
pub fn lms_to_rgb(l: f64, m: f64, s: f64) -> (f64, f64, f64) {
    apply(&LMS_TO_RGB, l, m, s)
}
