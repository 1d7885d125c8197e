//! cvdsim - color vision deficiency simulator
//!
//! CLI and HTTP service around the `cvd-engine` crate: PNG in, simulated
//! PNG out, plus a latest-frame-wins queue for live sources.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
