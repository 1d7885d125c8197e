//! Per-source scheduling of live frames.
//!
//! Each source has at most one frame being simulated and at most one frame
//! waiting. A newer frame replaces the waiting one, so a slow simulation
//! never builds a backlog: when it finishes, the most recent frame runs
//! next and everything in between is dropped.
//!
//! Stopping a source forgets it immediately. A simulation that is still
//! running is not interrupted; its result is discarded when it completes.

use async_trait::async_trait;
use chrono::Utc;
use cvd_engine::PixelBuffer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};

use super::output_cache::{FrameFailure, FrameSink, RenderedFrame};
use super::simulation_service::SimulationService;
use crate::error::{ScheduleError, SimulateError};
use crate::models::Selection;

/// Turns a submitted frame into its encoded output
#[async_trait]
pub trait FrameProcessor: Send + Sync {
    async fn process(
        &self,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError>;
}

#[async_trait]
impl FrameProcessor for SimulationService {
    async fn process(
        &self,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<Vec<u8>, SimulateError> {
        self.render_async(buffer, selection).await
    }
}

/// What happened to a submitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The source was idle; the frame is being simulated now
    Started,
    /// Another frame is in flight; this one waits. `replaced` is true when
    /// an older waiting frame was dropped to make room.
    Queued { replaced: bool },
}

/// Receipt for a submitted frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub outcome: SubmitOutcome,
}

/// Snapshot of a source's queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStatus {
    pub in_flight: Option<u64>,
    pub pending: Option<u64>,
}

struct Job {
    seq: u64,
    buffer: PixelBuffer,
    selection: Selection,
}

struct Slot {
    /// Distinguishes a restarted source from the one that was stopped
    generation: u64,
    in_flight: Option<u64>,
    pending: Option<Job>,
    idle: Arc<Notify>,
}

#[derive(Default)]
struct State {
    sources: HashMap<String, Slot>,
    next_seq: u64,
    next_generation: u64,
}

struct Inner {
    processor: Arc<dyn FrameProcessor>,
    sink: Arc<dyn FrameSink>,
    max_sources: usize,
    state: Mutex<State>,
}

/// Serializes frame simulation per live source
#[derive(Clone)]
pub struct FrameScheduler {
    inner: Arc<Inner>,
}

impl FrameScheduler {
    /// Scheduler without a limit on the number of sources
    pub fn new(processor: Arc<dyn FrameProcessor>, sink: Arc<dyn FrameSink>) -> Self {
        Self::with_max_sources(processor, sink, usize::MAX)
    }

    /// Scheduler tracking at most `max_sources` sources at once
    pub fn with_max_sources(
        processor: Arc<dyn FrameProcessor>,
        sink: Arc<dyn FrameSink>,
        max_sources: usize,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                processor,
                sink,
                max_sources,
                state: Mutex::new(State::default()),
            }),
        }
    }

    /// Hand a frame to the scheduler.
    ///
    /// Sequence numbers increase across all sources. A frame for a new
    /// source is refused once `max_sources` sources are known.
    pub async fn submit(
        &self,
        source: &str,
        buffer: PixelBuffer,
        selection: Selection,
    ) -> Result<Submission, ScheduleError> {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        if !state.sources.contains_key(source) && state.sources.len() >= self.inner.max_sources {
            tracing::warn!(source, max = self.inner.max_sources, "Source limit reached");
            return Err(ScheduleError::TooManySources {
                max: self.inner.max_sources,
            });
        }

        state.next_seq += 1;
        let seq = state.next_seq;
        let job = Job {
            seq,
            buffer,
            selection,
        };

        let next_generation = &mut state.next_generation;
        let slot = state
            .sources
            .entry(source.to_string())
            .or_insert_with(|| {
                *next_generation += 1;
                Slot {
                    generation: *next_generation,
                    in_flight: None,
                    pending: None,
                    idle: Arc::new(Notify::new()),
                }
            });

        if slot.in_flight.is_none() {
            slot.in_flight = Some(seq);
            tokio::spawn(Self::drive(
                self.inner.clone(),
                source.to_string(),
                slot.generation,
                job,
            ));
            tracing::debug!(source, seq, "Frame started");
            Ok(Submission {
                seq,
                outcome: SubmitOutcome::Started,
            })
        } else {
            let replaced = slot.pending.replace(job);
            if let Some(old) = &replaced {
                tracing::debug!(source, seq, dropped = old.seq, "Pending frame replaced");
            } else {
                tracing::debug!(source, seq, "Frame queued");
            }
            Ok(Submission {
                seq,
                outcome: SubmitOutcome::Queued {
                    replaced: replaced.is_some(),
                },
            })
        }
    }

    /// Forget `source` and its latest output.
    ///
    /// Returns false if the source was unknown.
    pub async fn stop(&self, source: &str) -> bool {
        let mut state = self.inner.state.lock().await;
        let removed = state.sources.remove(source);
        self.inner.sink.remove(source).await;

        match removed {
            Some(slot) => {
                if let Some(seq) = slot.in_flight {
                    tracing::debug!(source, seq, "Source stopped, in-flight frame will be discarded");
                }
                slot.idle.notify_waiters();
                true
            }
            None => false,
        }
    }

    /// Current queue of `source`, if it is known
    pub async fn status(&self, source: &str) -> Option<SourceStatus> {
        let state = self.inner.state.lock().await;
        state.sources.get(source).map(|slot| SourceStatus {
            in_flight: slot.in_flight,
            pending: slot.pending.as_ref().map(|job| job.seq),
        })
    }

    /// Wait until `source` has no frame in flight (or is unknown)
    pub async fn wait_idle(&self, source: &str) {
        loop {
            let state = self.inner.state.lock().await;
            let idle = match state.sources.get(source) {
                Some(slot) if slot.in_flight.is_some() => slot.idle.clone(),
                _ => return,
            };
            // Registered before the lock is released, so no wakeup is lost
            let notified = idle.notified();
            drop(state);
            notified.await;
        }
    }

    async fn drive(inner: Arc<Inner>, source: String, generation: u64, mut job: Job) {
        loop {
            let seq = job.seq;
            let label = job.selection.label();
            let result = inner.processor.process(job.buffer, job.selection).await;

            let mut state = inner.state.lock().await;
            let slot = match state.sources.get_mut(&source) {
                Some(slot) if slot.generation == generation => slot,
                _ => {
                    tracing::debug!(source = %source, seq, "Source stopped, discarding frame");
                    return;
                }
            };

            match result {
                Ok(png_bytes) => {
                    tracing::debug!(source = %source, seq, bytes = png_bytes.len(), "Frame published");
                    inner
                        .sink
                        .publish(
                            &source,
                            RenderedFrame {
                                seq,
                                png_bytes,
                                label,
                                generated_at: Utc::now(),
                            },
                        )
                        .await;
                }
                Err(e) => {
                    tracing::warn!(source = %source, seq, error = %e, "Frame failed, keeping previous output");
                    inner
                        .sink
                        .record_failure(
                            &source,
                            FrameFailure {
                                seq,
                                error: e.to_string(),
                                failed_at: Utc::now(),
                            },
                        )
                        .await;
                }
            }

            match slot.pending.take() {
                Some(next) => {
                    slot.in_flight = Some(next.seq);
                    job = next;
                }
                None => {
                    slot.in_flight = None;
                    slot.idle.notify_waiters();
                    return;
                }
            }
        }
    }
}
