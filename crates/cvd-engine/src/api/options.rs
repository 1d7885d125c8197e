//! Simulation options and configuration.
//!
//! This module provides [`SimulationOptions`] together with the validated
//! [`Intensity`] newtype and the [`GammaMode`] switch.

use std::fmt;
use std::str::FromStr;

use super::error::CvdError;
use crate::color::{delinearize, linearize};
use crate::deficiency::Deficiency;

/// Blend factor between the original (0.0) and the fully simulated (1.0)
/// color.
///
/// Construction is strict: [`Intensity::new`] rejects anything outside
/// `0.0..=1.0`. Callers that prefer clamping must opt in with
/// [`Intensity::saturating`].
///
/// # Example
///
/// ```
/// use cvd_engine::{Intensity, ErrorKind};
///
/// assert_eq!(Intensity::new(0.25).unwrap().value(), 0.25);
/// assert_eq!(Intensity::new(1.5).unwrap_err().kind(), ErrorKind::InvalidArgument);
/// assert_eq!(Intensity::saturating(1.5), Intensity::FULL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Intensity(f64);

impl Intensity {
    /// Original colors, untouched
    pub const NONE: Intensity = Intensity(0.0);
    /// Complete loss of the affected cone
    pub const FULL: Intensity = Intensity(1.0);

    /// Validate a blend factor.
    pub fn new(value: f64) -> Result<Self, CvdError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CvdError::IntensityOutOfRange(value))
        }
    }

    /// Clamp into `0.0..=1.0`. NaN becomes [`Intensity::NONE`].
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::NONE
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Build from a whole percentage (0..=100), the unit of a UI slider.
    pub fn from_percent(percent: u32) -> Result<Self, CvdError> {
        Self::new(percent as f64 / 100.0)
    }

    /// The raw factor.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether this leaves colors untouched.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::FULL
    }
}

impl TryFrom<f64> for Intensity {
    type Error = CvdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the LMS transform operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GammaMode {
    /// Decode to linear light (gamma 2.2) before the cone transform and
    /// re-encode after. Physically meaningful; the default.
    #[default]
    Linearized,
    /// Apply the matrices directly to the 0..255 encoded values. Cheaper
    /// but darkens and over-saturates the result; kept for comparison with
    /// simulators that skip gamma handling.
    Encoded,
}

impl GammaMode {
    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            GammaMode::Linearized => "linear",
            GammaMode::Encoded => "encoded",
        }
    }

    /// Bring 8-bit samples into the space the matrices operate in.
    #[inline]
    pub fn decode(self, r: u8, g: u8, b: u8) -> (f64, f64, f64) {
        match self {
            GammaMode::Linearized => (linearize(r), linearize(g), linearize(b)),
            GammaMode::Encoded => (r as f64, g as f64, b as f64),
        }
    }

    /// Bring a matrix result back to the unclamped 0..255 scale.
    #[inline]
    pub fn encode(self, r: f64, g: f64, b: f64) -> (f64, f64, f64) {
        match self {
            GammaMode::Linearized => (delinearize(r), delinearize(g), delinearize(b)),
            GammaMode::Encoded => (r, g, b),
        }
    }
}

impl fmt::Display for GammaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GammaMode {
    type Err = CvdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "linearized" | "gamma" => Ok(GammaMode::Linearized),
            "encoded" | "none" | "off" => Ok(GammaMode::Encoded),
            _ => Err(CvdError::UnknownGammaMode(s.to_string())),
        }
    }
}

/// Everything a single transform needs.
///
/// # Defaults
///
/// There is no `Default`: a deficiency must always be chosen. The
/// remaining fields default to full intensity and linearized gamma.
///
/// # Example
///
/// ```
/// use cvd_engine::{Deficiency, GammaMode, Intensity, SimulationOptions};
///
/// let options = SimulationOptions::new(Deficiency::Deuteranopia)
///     .intensity(Intensity::new(0.5).unwrap())
///     .gamma(GammaMode::Encoded);
/// assert_eq!(options.intensity.value(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    /// Which cone class is lost
    pub deficiency: Deficiency,
    /// Blend factor toward the simulated color
    pub intensity: Intensity,
    /// Whether the cone transform runs on linear light
    pub gamma: GammaMode,
}

impl SimulationOptions {
    /// Full-strength, gamma-correct simulation of `deficiency`.
    #[inline]
    pub fn new(deficiency: Deficiency) -> Self {
        Self {
            deficiency,
            intensity: Intensity::FULL,
            gamma: GammaMode::Linearized,
        }
    }

    /// Set the blend factor.
    #[inline]
    pub fn intensity(mut self, intensity: Intensity) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set the gamma mode.
    #[inline]
    pub fn gamma(mut self, gamma: GammaMode) -> Self {
        self.gamma = gamma;
        self
    }
}
