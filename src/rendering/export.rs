//! Export naming and PNG optimization.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::error::SimulateError;

/// File name for an exported image: `corrected-<label>-<unix millis>.png`.
pub fn export_filename(label: &str, at: DateTime<Utc>) -> String {
    format!("corrected-{}-{}.png", label, at.timestamp_millis())
}

/// Losslessly re-compress a PNG. Returns the input unchanged if oxipng
/// fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let before = png_bytes.len();
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    tracing::debug!(before, after = optimized.len(), "Optimized PNG");
    optimized
}

/// Where an export should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    /// Exactly this path
    File(PathBuf),
    /// A generated file name inside this directory
    Directory(PathBuf),
}

impl ExportTarget {
    /// Resolve to a concrete path.
    pub fn path(&self, label: &str, at: DateTime<Utc>) -> PathBuf {
        match self {
            ExportTarget::File(path) => path.clone(),
            ExportTarget::Directory(dir) => dir.join(export_filename(label, at)),
        }
    }
}

/// Write `png_bytes` to `target`, creating the directory if needed.
pub fn write_export(
    target: &ExportTarget,
    label: &str,
    png_bytes: &[u8],
) -> Result<PathBuf, SimulateError> {
    let path = target.path(label, Utc::now());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    std::fs::write(&path, png_bytes)?;
    tracing::info!(path = %path.display(), bytes = png_bytes.len(), "Exported image");
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), SimulateError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
