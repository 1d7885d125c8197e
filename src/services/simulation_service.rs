use cvd_engine::{transform_with, PixelBuffer};
use std::path::Path;
use std::time::Instant;

use crate::error::SimulateError;
use crate::models::{AppConfig, Selection};
use crate::rendering::{decode_png, encode_png, optimize_png, write_export, ExportTarget, SizeLimit};

/// Runs the engine on decoded images.
///
/// The blocking methods do the CPU work inline; the async methods move it
/// onto tokio's blocking pool so request handlers never stall the runtime.
#[derive(Debug, Clone)]
pub struct SimulationService {
    limit: SizeLimit,
    optimize: bool,
}

impl SimulationService {
    pub fn new(limit: SizeLimit, optimize: bool) -> Self {
        Self { limit, optimize }
    }

    /// Service configured from the `server` and `export` sections
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            SizeLimit {
                max_width: config.server.max_width,
                max_height: config.server.max_height,
            },
            config.export.optimize,
        )
    }

    pub fn limit(&self) -> SizeLimit {
        self.limit
    }

    /// Apply `selection` to a decoded buffer
    pub fn apply(
        &self,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<PixelBuffer, SimulateError> {
        match selection {
            Selection::Passthrough => Ok(buffer),
            Selection::Simulate(options) => {
                let started = Instant::now();
                let output = transform_with(&buffer, &options)?;
                tracing::debug!(
                    width = buffer.width(),
                    height = buffer.height(),
                    deficiency = %options.deficiency,
                    intensity = options.intensity.value(),
                    gamma = %options.gamma,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Simulated image"
                );
                Ok(output)
            }
        }
    }

    /// Apply `selection` and encode the result as PNG
    pub fn render(
        &self,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError> {
        let output = self.apply(buffer, selection)?;
        let png_bytes = encode_png(&output)?;
        Ok(if self.optimize {
            optimize_png(png_bytes)
        } else {
            png_bytes
        })
    }

    /// Decode, simulate and re-encode a PNG
    pub fn simulate_png_blocking(
        &self,
        png_bytes: &[u8],
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError> {
        let buffer = decode_png(png_bytes, self.limit)?;
        self.render(buffer, selection)
    }

    /// Simulate a PNG file and write the result to `target`
    pub fn simulate_file(
        &self,
        input: &Path,
        selection: Selection,
        target: &ExportTarget,
    ) -> Result<std::path::PathBuf, SimulateError> {
        let png_bytes = std::fs::read(input)?;
        let output = self.simulate_png_blocking(&png_bytes, selection)?;
        write_export(target, selection.label(), &output)
    }

    /// Async form of [`simulate_png_blocking`](Self::simulate_png_blocking)
    pub async fn simulate_png(
        &self,
        png_bytes: Vec<u8>,
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.simulate_png_blocking(&png_bytes, selection))
            .await
            .map_err(|e| SimulateError::Task(e.to_string()))?
    }

    /// Decode a PNG off the async runtime
    pub async fn decode(&self, png_bytes: Vec<u8>) -> Result<PixelBuffer, SimulateError> {
        let limit = self.limit;
        tokio::task::spawn_blocking(move || decode_png(&png_bytes, limit))
            .await
            .map_err(|e| SimulateError::Task(e.to_string()))?
    }

    /// Async form of [`render`](Self::render)
    pub async fn render_async(
        &self,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.render(buffer, selection))
            .await
            .map_err(|e| SimulateError::Task(e.to_string()))?
    }
}

impl Default for SimulationService {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
