//! Color types and conversion utilities
//!
//! This module provides type-safe color handling with compile-time distinction
//! between display-encoded, linear-light and cone-response representations.
//!
//! # Color Spaces
//!
//! - **Srgb**: 8-bit display-encoded samples. Use for I/O.
//! - **LinearRgb**: Linear light intensity, reached through the gamma codec.
//! - **Lms**: Long/medium/short cone responses. Deficiency simulation
//!   happens here.
//!
//! # Example
//!
//! ```
//! use cvd_engine::color::{Lms, LinearRgb, Srgb};
//!
//! // Load a pixel from an image (sRGB)
//! let srgb = Srgb::new(128, 64, 32);
//!
//! // Convert to linear, then to cone responses
//! let linear = LinearRgb::from(srgb);
//! let lms = Lms::from(linear);
//!
//! // And back again
//! let encoded = LinearRgb::from(lms).to_encoded();
//! assert!((encoded[0] - 128.0).abs() < 0.5);
//! ```

mod gamma;
mod linear_rgb;
mod lms;
mod srgb;

pub use gamma::{delinearize, linearize, GAMMA};
pub use linear_rgb::LinearRgb;
pub use lms::{lms_to_rgb, rgb_to_lms, Lms, LMS_TO_RGB, RGB_TO_LMS};
pub use srgb::Srgb;
