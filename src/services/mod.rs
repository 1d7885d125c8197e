pub mod frame_scheduler;
pub mod output_cache;
pub mod simulation_service;

pub use frame_scheduler::{FrameProcessor, FrameScheduler, SourceStatus, SubmitOutcome, Submission};
pub use output_cache::{FrameFailure, FrameSink, OutputCache, RenderedFrame};
pub use simulation_service::SimulationService;
