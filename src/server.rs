//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::{AppConfig, SimulationParams};
use crate::services::{FrameScheduler, OutputCache, SimulationService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub simulator: Arc<SimulationService>,
    pub scheduler: Arc<FrameScheduler>,
    pub output_cache: Arc<OutputCache>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let simulator = Arc::new(SimulationService::from_config(&config));
    let output_cache = Arc::new(OutputCache::new());
    let scheduler = Arc::new(FrameScheduler::with_max_sources(
        simulator.clone(),
        output_cache.clone(),
        config.server.max_sources,
    ));

    AppState {
        config,
        simulator,
        scheduler,
        output_cache,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/simulate", post(handle_simulate))
        .route(
            "/api/frames/:source",
            post(handle_submit_frame)
                .get(handle_frame_status)
                .delete(handle_stop_frames),
        )
        .route("/api/frames/:source/latest", get(handle_latest_frame))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_simulate(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: axum::extract::Query<SimulationParams>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_simulate(
        axum::extract::State(state.simulator),
        axum::extract::State(state.config),
        query,
        body,
    )
    .await
}

async fn handle_submit_frame(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
    query: axum::extract::Query<SimulationParams>,
    body: axum::body::Bytes,
) -> Result<axum::response::Response, ApiError> {
    api::handle_submit_frame(
        axum::extract::State(state.simulator),
        axum::extract::State(state.scheduler),
        axum::extract::State(state.config),
        path,
        query,
        body,
    )
    .await
}

async fn handle_latest_frame(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_latest_frame(axum::extract::State(state.output_cache), path).await
}

async fn handle_frame_status(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::Json<api::FrameStatusResponse>, ApiError> {
    api::handle_frame_status(
        axum::extract::State(state.scheduler),
        axum::extract::State(state.output_cache),
        path,
    )
    .await
}

async fn handle_stop_frames(
    axum::extract::State(state): axum::extract::State<AppState>,
    path: axum::extract::Path<String>,
) -> Result<axum::http::StatusCode, ApiError> {
    api::handle_stop_frames(axum::extract::State(state.scheduler), path).await
}
