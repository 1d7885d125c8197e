use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AppConfig, SimulationParams};
use crate::rendering::export_filename;
use crate::services::SimulationService;

/// Simulate a color vision deficiency on an uploaded PNG
///
/// Returns the simulated image as a PNG attachment named
/// `corrected-<deficiency>-<unix millis>.png`. Omitted parameters fall back
/// to the configured defaults.
#[utoipa::path(
    post,
    path = "/api/simulate",
    request_body(content = String, description = "PNG image", content_type = "image/png"),
    responses(
        (status = 200, description = "Simulated PNG image", content_type = "image/png"),
        (status = 400, description = "Invalid parameter or undecodable PNG", body = super::ErrorResponse),
        (status = 413, description = "Image or body too large", body = super::ErrorResponse),
        (status = 500, description = "Simulation failed", body = super::ErrorResponse),
    ),
    params(
        ("deficiency" = Option<String>, Query, description = "protanopia, deuteranopia, tritanopia (or p/d/t), or none"),
        ("intensity" = Option<f64>, Query, description = "Blend factor 0.0..=1.0"),
        ("percent" = Option<u32>, Query, description = "Blend factor in percent; ignored when intensity is given"),
        ("gamma" = Option<String>, Query, description = "linear (default) or encoded"),
    ),
    tag = "Simulation"
)]
pub async fn handle_simulate(
    State(service): State<Arc<SimulationService>>,
    State(config): State<Arc<AppConfig>>,
    Query(params): Query<SimulationParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidParameter(
            "request body must be a PNG image".to_string(),
        ));
    }

    let selection = params.resolve(&config.simulation)?;
    let png_bytes = service.simulate_png(body.to_vec(), selection).await?;

    let filename = export_filename(selection.label(), Utc::now());
    let disposition = format!("attachment; filename=\"{filename}\"");

    tracing::info!(
        deficiency = selection.label(),
        size_bytes = png_bytes.len(),
        "Image simulated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        Bytes::from(png_bytes),
    )
        .into_response())
}
