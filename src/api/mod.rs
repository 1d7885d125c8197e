pub mod frames;
pub mod simulate;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use frames::{
    handle_frame_status, handle_latest_frame, handle_stop_frames, handle_submit_frame,
    FrameStatusResponse, FrameSubmitResponse, FRAME_SEQ_HEADER,
};
pub use frames::{
    __path_handle_frame_status, __path_handle_latest_frame, __path_handle_stop_frames,
    __path_handle_submit_frame,
};
pub use simulate::{handle_simulate, __path_handle_simulate};

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Error message
    pub error: String,
}
