use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{AppConfig, SimulationParams};
use crate::services::{FrameScheduler, OutputCache, SimulationService, SubmitOutcome};

/// Longest accepted source name
const MAX_SOURCE_LEN: usize = 64;

/// Response header carrying the sequence number of the served frame
pub const FRAME_SEQ_HEADER: &str = "x-frame-seq";

/// Response from frame submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameSubmitResponse {
    /// Status code (202 = accepted)
    pub status: u16,
    /// Source the frame was submitted to
    pub source: String,
    /// Sequence number assigned to the frame
    pub seq: u64,
    /// "started" if simulation began immediately, "queued" otherwise
    pub outcome: String,
    /// Whether an older queued frame was dropped
    pub replaced: bool,
}

/// Queue and output state of a live source
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FrameStatusResponse {
    pub source: String,
    /// Sequence number of the frame being simulated
    pub in_flight: Option<u64>,
    /// Sequence number of the frame waiting its turn
    pub pending: Option<u64>,
    /// Sequence number of the latest available output
    pub latest_seq: Option<u64>,
    /// When the latest output was generated (RFC 3339)
    pub latest_generated_at: Option<String>,
    /// Message of the most recent failed frame
    pub last_error: Option<String>,
}

/// Source names end up in URLs and logs; keep them boring.
fn validate_source(source: &str) -> Result<(), ApiError> {
    if source.is_empty() || source.len() > MAX_SOURCE_LEN {
        return Err(ApiError::InvalidParameter(format!(
            "source name must be 1 to {MAX_SOURCE_LEN} characters"
        )));
    }
    if !source
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ApiError::InvalidParameter(format!(
            "source name {source:?} may only contain letters, digits, '-' and '_'"
        )));
    }
    Ok(())
}

/// Submit a frame from a live source
///
/// The frame is simulated in the background. At most one frame per source
/// is simulated at a time; while one is running, newer submissions replace
/// each other and only the latest one runs next.
#[utoipa::path(
    post,
    path = "/api/frames/{source}",
    request_body(content = String, description = "PNG frame", content_type = "image/png"),
    responses(
        (status = 202, description = "Frame accepted", body = FrameSubmitResponse),
        (status = 400, description = "Invalid parameter or undecodable PNG", body = super::ErrorResponse),
        (status = 413, description = "Frame too large", body = super::ErrorResponse),
        (status = 429, description = "Too many live sources", body = super::ErrorResponse),
    ),
    params(
        ("source" = String, Path, description = "Live source name"),
        ("deficiency" = Option<String>, Query, description = "protanopia, deuteranopia, tritanopia (or p/d/t), or none"),
        ("intensity" = Option<f64>, Query, description = "Blend factor 0.0..=1.0"),
        ("percent" = Option<u32>, Query, description = "Blend factor in percent; ignored when intensity is given"),
        ("gamma" = Option<String>, Query, description = "linear (default) or encoded"),
    ),
    tag = "Frames"
)]
pub async fn handle_submit_frame(
    State(service): State<Arc<SimulationService>>,
    State(scheduler): State<Arc<FrameScheduler>>,
    State(config): State<Arc<AppConfig>>,
    Path(source): Path<String>,
    Query(params): Query<SimulationParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    validate_source(&source)?;
    let selection = params.resolve(&config.simulation)?;
    let buffer = service.decode(body.to_vec()).await?;

    let submission = scheduler.submit(&source, buffer, selection).await?;
    let (outcome, replaced) = match submission.outcome {
        SubmitOutcome::Started => ("started", false),
        SubmitOutcome::Queued { replaced } => ("queued", replaced),
    };

    tracing::info!(source = %source, seq = submission.seq, outcome, replaced, "Frame submitted");

    Ok((
        StatusCode::ACCEPTED,
        Json(FrameSubmitResponse {
            status: StatusCode::ACCEPTED.as_u16(),
            source,
            seq: submission.seq,
            outcome: outcome.to_string(),
            replaced,
        }),
    )
        .into_response())
}

/// Get the latest simulated frame of a live source
#[utoipa::path(
    get,
    path = "/api/frames/{source}/latest",
    responses(
        (status = 200, description = "Latest simulated frame", content_type = "image/png"),
        (status = 404, description = "No output yet", body = super::ErrorResponse),
    ),
    params(
        ("source" = String, Path, description = "Live source name"),
    ),
    tag = "Frames"
)]
pub async fn handle_latest_frame(
    State(cache): State<Arc<OutputCache>>,
    Path(source): Path<String>,
) -> Result<Response, ApiError> {
    validate_source(&source)?;
    let frame = cache.latest(&source).await.ok_or(ApiError::NotFound)?;
    let seq = frame.seq.to_string();

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "no-store"),
            (HeaderName::from_static(FRAME_SEQ_HEADER), seq.as_str()),
        ],
        Bytes::from(frame.png_bytes),
    )
        .into_response())
}

/// Get the queue and output state of a live source
#[utoipa::path(
    get,
    path = "/api/frames/{source}",
    responses(
        (status = 200, description = "Source status", body = FrameStatusResponse),
        (status = 404, description = "Unknown source", body = super::ErrorResponse),
    ),
    params(
        ("source" = String, Path, description = "Live source name"),
    ),
    tag = "Frames"
)]
pub async fn handle_frame_status(
    State(scheduler): State<Arc<FrameScheduler>>,
    State(cache): State<Arc<OutputCache>>,
    Path(source): Path<String>,
) -> Result<Json<FrameStatusResponse>, ApiError> {
    validate_source(&source)?;
    let status = scheduler.status(&source).await.ok_or(ApiError::NotFound)?;
    let latest = cache.latest(&source).await;
    let last_error = cache.last_error(&source).await;

    Ok(Json(FrameStatusResponse {
        source,
        in_flight: status.in_flight,
        pending: status.pending,
        latest_seq: latest.as_ref().map(|f| f.seq),
        latest_generated_at: latest.as_ref().map(|f| f.generated_at.to_rfc3339()),
        last_error: last_error.map(|e| e.error),
    }))
}

/// Stop a live source
///
/// Forgets the source and its output. A frame still being simulated is
/// discarded when it finishes.
#[utoipa::path(
    delete,
    path = "/api/frames/{source}",
    responses(
        (status = 204, description = "Source stopped"),
    ),
    params(
        ("source" = String, Path, description = "Live source name"),
    ),
    tag = "Frames"
)]
pub async fn handle_stop_frames(
    State(scheduler): State<Arc<FrameScheduler>>,
    Path(source): Path<String>,
) -> Result<StatusCode, ApiError> {
    validate_source(&source)?;
    let known = scheduler.stop(&source).await;
    tracing::info!(source = %source, known, "Source stopped");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_source() {
        assert!(validate_source("camera-1").is_ok());
        assert!(validate_source("front_door").is_ok());
        assert!(validate_source(&"a".repeat(MAX_SOURCE_LEN)).is_ok());

        assert!(validate_source("").is_err());
        assert!(validate_source(&"a".repeat(MAX_SOURCE_LEN + 1)).is_err());
        assert!(validate_source("../etc").is_err());
        assert!(validate_source("cam era").is_err());
    }
}
