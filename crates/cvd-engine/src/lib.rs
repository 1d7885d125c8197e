// Published matrix constants carry more digits than f64 round-trips
#![allow(clippy::excessive_precision)]

//! cvd-engine: Color vision deficiency simulation for RGBA images
//!
//! This library re-renders an image the way it appears to a viewer with
//! protanopia, deuteranopia or tritanopia, optionally blended with the
//! original at a chosen intensity.
//!
//! # Quick Start
//!
//! The [`CvdSimulator`] builder is the primary entry point:
//!
//! ```
//! use cvd_engine::{CvdSimulator, Deficiency, PixelBuffer};
//!
//! let frame = PixelBuffer::filled(2, 2, [255, 0, 0, 255]).unwrap();
//! let simulator = CvdSimulator::new(Deficiency::Protanopia);
//! let result = simulator.simulate(&frame).unwrap();
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.height(), 2);
//! assert_eq!(result.pixel(0, 0), Some([100, 73, 35, 255]));
//! ```
//!
//! # Free Functions
//!
//! For one-off calls, [`transform()`] takes the deficiency and intensity
//! directly, and [`transform_with()`] accepts full [`SimulationOptions`]:
//!
//! ```
//! use cvd_engine::{transform, Deficiency, Intensity, PixelBuffer};
//!
//! let frame = PixelBuffer::filled(1, 1, [128, 128, 128, 255]).unwrap();
//! let half = Intensity::new(0.5).unwrap();
//! let result = transform(&frame, Deficiency::Tritanopia, half).unwrap();
//! assert_eq!(result.pixel(0, 0).unwrap()[3], 255);
//! ```
//!
//! # Color Science
//!
//! ## Three Color Spaces
//!
//! | Color Space | Key Property | Used For |
//! |-------------|--------------|----------|
//! | **sRGB** ([`Srgb`]) | Display encoding, gamma 2.2 | Input and output bytes |
//! | **Linear RGB** ([`LinearRgb`]) | Proportional to light intensity | Input to the cone transform |
//! | **LMS** ([`Lms`]) | Response of the three cone classes | Deficiency simulation |
//!
//! Cone responses are linear in light, so the RGB to LMS matrix
//! (Hunt-Pointer-Estévez) must be applied to linear values. Applying it to
//! encoded bytes darkens the result and exaggerates saturation; that mode
//! is still available as [`GammaMode::Encoded`] for comparison.
//!
//! ## Dichromacy Model
//!
//! A dichromat lacks one cone class. Its response is rebuilt as a linear
//! combination of the other two (Brettel et al. coefficients), so every
//! color collapses onto the plane the viewer can still distinguish. See
//! [`Deficiency::simulate`].
//!
//! ## Pipeline Overview
//!
//! ```text
//! RGBA8 input
//!     |
//!     v
//! LinearRgb             (gamma decode via LUT, skipped in Encoded mode)
//!     |
//!     v
//! Lms                   (RGB_TO_LMS)
//!     |
//!     v
//! Lms'                  (affected cone replaced)
//!     |
//!     v
//! LinearRgb'            (LMS_TO_RGB, may leave the gamut)
//!     |
//!     v
//! encoded f64           (gamma encode, unclamped)
//!     |
//!     v
//! blend + round + clamp (only float-to-byte step; alpha copied)
//!     |
//!     v
//! RGBA8 output
//! ```
//!
//! ## Numerical Notes
//!
//! - The two matrices are inverses only to about 1e-4, so an identity
//!   round trip can move a channel by a fraction of a step.
//! - The substitution coefficients do not preserve neutrals: mid grey
//!   under protanopia comes out blue-green. This is a property of the
//!   published constants and is pinned by regression tests.
//! - Out-of-gamut negatives are gamma-encoded sign-symmetrically and then
//!   clamped to 0 in [`blend`].
//!
//! # Features
//!
//! - `parallel` (default): process rows on the rayon thread pool.
//!   Output is byte-identical to the sequential path.

pub mod api;
pub mod buffer;
pub mod color;
pub mod deficiency;
pub mod engine;

// Re-export primary types at crate root
pub use api::{CvdError, CvdSimulator, ErrorKind, GammaMode, Intensity, SimulationOptions};
pub use buffer::PixelBuffer;
pub use color::{LinearRgb, Lms, Srgb};
pub use deficiency::{simulate_deficiency, Cone, Deficiency};
pub use engine::{blend, simulate_rgba, transform, transform_raw, transform_with};

#[cfg(test)]
mod domain_tests;
