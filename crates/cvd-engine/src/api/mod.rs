//! Public API for the cvd-engine crate.
//!
//! This module provides the high-level API: the [`CvdSimulator`] builder,
//! the [`SimulationOptions`] it carries and the [`CvdError`] unified error
//! type.

mod builder;
mod error;
mod options;

pub use builder::CvdSimulator;
pub use error::{CvdError, ErrorKind};
pub use options::{GammaMode, Intensity, SimulationOptions};
