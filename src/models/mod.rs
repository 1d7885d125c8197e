pub mod config;
pub mod simulation_params;

pub use config::{AppConfig, ExportConfig, ServerConfig, SimulationConfig};
pub use simulation_params::{Selection, SimulationParams, PASSTHROUGH};
