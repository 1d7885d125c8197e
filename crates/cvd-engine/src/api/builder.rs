//! CvdSimulator builder -- the ergonomic entry point for the crate.

use super::error::CvdError;
use super::options::{GammaMode, Intensity, SimulationOptions};
use crate::buffer::PixelBuffer;
use crate::deficiency::Deficiency;
use crate::engine::{simulate_rgba, transform_with};

/// Reusable, preconfigured deficiency simulator.
///
/// # Design
///
/// - Constructor requires a [`Deficiency`] (there is no neutral default)
/// - Configuration methods consume and return `self`
/// - [`simulate()`](Self::simulate) takes `&self`, so one simulator can be
///   shared across threads and frames
///
/// # Example
///
/// ```
/// use cvd_engine::{CvdSimulator, Deficiency, GammaMode, Intensity, PixelBuffer};
///
/// let simulator = CvdSimulator::new(Deficiency::Protanopia)
///     .intensity(Intensity::new(0.5).unwrap())
///     .gamma(GammaMode::Linearized);
///
/// let frame = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
/// let result = simulator.simulate(&frame).unwrap();
///
/// assert_eq!(result.width(), 2);
/// assert_eq!(result.pixel(0, 0), Some([177, 37, 18, 255]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvdSimulator {
    options: SimulationOptions,
}

impl CvdSimulator {
    /// Full-intensity, gamma-correct simulator for `deficiency`.
    pub fn new(deficiency: Deficiency) -> Self {
        Self {
            options: SimulationOptions::new(deficiency),
        }
    }

    /// Wrap existing options.
    pub fn from_options(options: SimulationOptions) -> Self {
        Self { options }
    }

    /// Set the deficiency.
    #[inline]
    pub fn deficiency(mut self, deficiency: Deficiency) -> Self {
        self.options.deficiency = deficiency;
        self
    }

    /// Set the blend factor.
    #[inline]
    pub fn intensity(mut self, intensity: Intensity) -> Self {
        self.options = self.options.intensity(intensity);
        self
    }

    /// Set the gamma mode.
    #[inline]
    pub fn gamma(mut self, gamma: GammaMode) -> Self {
        self.options = self.options.gamma(gamma);
        self
    }

    /// The effective options.
    #[inline]
    pub fn options(&self) -> &SimulationOptions {
        &self.options
    }

    /// Transform a whole buffer. See [`transform_with`](crate::transform_with).
    pub fn simulate(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, CvdError> {
        transform_with(buffer, &self.options)
    }

    /// Transform one `[R, G, B, A]` pixel.
    pub fn simulate_pixel(&self, rgba: [u8; 4]) -> Result<[u8; 4], CvdError> {
        simulate_rgba(rgba, &self.options)
    }
}

impl From<SimulationOptions> for CvdSimulator {
    fn from(options: SimulationOptions) -> Self {
        Self::from_options(options)
    }
}
