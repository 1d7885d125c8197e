//! Request-level simulation parameters and their resolution against the
//! configured defaults.

use cvd_engine::{CvdError, Deficiency, GammaMode, Intensity, SimulationOptions};
use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;

/// Deficiency name that skips the engine entirely.
pub const PASSTHROUGH: &str = "none";

/// Query parameters shared by the simulate and frame endpoints.
///
/// Every field is optional; missing fields fall back to
/// [`SimulationConfig`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SimulationParams {
    /// `protanopia`, `deuteranopia`, `tritanopia` (or `p`/`d`/`t`), or `none`
    #[serde(default)]
    pub deficiency: Option<String>,

    /// Blend factor 0.0..=1.0
    #[serde(default)]
    pub intensity: Option<f64>,

    /// Blend factor as a whole percentage 0..=100; ignored when
    /// `intensity` is also given
    #[serde(default)]
    pub percent: Option<u32>,

    /// `linear` or `encoded`
    #[serde(default)]
    pub gamma: Option<String>,
}

/// What to do with an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Leave the pixels untouched
    Passthrough,
    /// Run the engine with these options
    Simulate(SimulationOptions),
}

impl Selection {
    /// Label used in file names and logs.
    pub fn label(&self) -> &'static str {
        match self {
            Selection::Passthrough => PASSTHROUGH,
            Selection::Simulate(options) => options.deficiency.name(),
        }
    }
}

impl SimulationParams {
    /// Combine with `defaults` and validate.
    pub fn resolve(&self, defaults: &SimulationConfig) -> Result<Selection, CvdError> {
        let deficiency = self
            .deficiency
            .as_deref()
            .unwrap_or(&defaults.deficiency)
            .trim();

        let intensity = match (self.intensity, self.percent) {
            (Some(value), _) => Intensity::new(value)?,
            (None, Some(percent)) => Intensity::from_percent(percent)?,
            (None, None) => Intensity::new(defaults.intensity)?,
        };

        let gamma: GammaMode = self.gamma.as_deref().unwrap_or(&defaults.gamma).parse()?;

        if deficiency.eq_ignore_ascii_case(PASSTHROUGH) {
            return Ok(Selection::Passthrough);
        }

        let deficiency: Deficiency = deficiency.parse()?;
        Ok(Selection::Simulate(
            SimulationOptions::new(deficiency)
                .intensity(intensity)
                .gamma(gamma),
        ))
    }
}
