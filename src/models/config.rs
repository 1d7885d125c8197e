use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::simulation_params::{Selection, SimulationParams};

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Defaults applied when a request or command leaves a parameter out
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Limits for the HTTP service
    #[serde(default)]
    pub server: ServerConfig,

    /// Where and how exported PNGs are written
    #[serde(default)]
    pub export: ExportConfig,
}

/// Default simulation parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Deficiency name, or "none" to pass images through
    #[serde(default = "default_deficiency")]
    pub deficiency: String,

    /// Blend factor between original (0.0) and simulated (1.0)
    #[serde(default = "default_intensity")]
    pub intensity: f64,

    /// "linear" (gamma-correct) or "encoded"
    #[serde(default = "default_gamma")]
    pub gamma: String,
}

fn default_deficiency() -> String {
    "protanopia".to_string()
}

fn default_intensity() -> f64 {
    1.0
}

fn default_gamma() -> String {
    "linear".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            deficiency: default_deficiency(),
            intensity: default_intensity(),
            gamma: default_gamma(),
        }
    }
}

/// Request limits for the HTTP service
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Widest accepted image in pixels
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,

    /// Tallest accepted image in pixels
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Most live sources tracked at once; submits for new sources beyond
    /// this are refused until one is stopped
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

fn default_max_dimension() -> u32 {
    4096
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_sources() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            max_body_bytes: default_max_body_bytes(),
            max_sources: default_max_sources(),
        }
    }
}

/// PNG export settings
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Directory used when the CLI is given neither --output nor --output-dir
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Re-compress exported PNGs with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            optimize: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the file named by `CONFIG_FILE`, if set
    pub fn from_env() -> Self {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => {
                tracing::debug!("CONFIG_FILE not set, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a YAML file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        deficiency = %config.simulation.deficiency,
                        intensity = config.simulation.intensity,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config
            .default_selection()
            .map_err(|e| anyhow::anyhow!("invalid simulation defaults: {e}"))?;
        if config.server.max_width == 0 || config.server.max_height == 0 {
            anyhow::bail!("server.max_width and server.max_height must be positive");
        }
        if config.server.max_sources == 0 {
            anyhow::bail!("server.max_sources must be positive");
        }
        Ok(config)
    }

    /// The selection used when no parameters are given at all
    pub fn default_selection(&self) -> Result<Selection, cvd_engine::CvdError> {
        SimulationParams::default().resolve(&self.simulation)
    }
}
