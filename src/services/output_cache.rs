use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A simulated frame ready to be served
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    /// Submission sequence number of the source frame
    pub seq: u64,
    /// Encoded PNG bytes
    pub png_bytes: Vec<u8>,
    /// Deficiency label the frame was rendered with
    pub label: &'static str,
    /// When this frame was generated
    pub generated_at: DateTime<Utc>,
}

/// A frame that could not be simulated
#[derive(Debug, Clone, PartialEq)]
pub struct FrameFailure {
    pub seq: u64,
    pub error: String,
    pub failed_at: DateTime<Utc>,
}

/// Receiver of scheduler results for live sources
#[async_trait]
pub trait FrameSink: Send + Sync {
    /// Replace the latest output of `source`
    async fn publish(&self, source: &str, frame: RenderedFrame);

    /// Note a failed frame; the latest output stays in place
    async fn record_failure(&self, source: &str, failure: FrameFailure);

    /// Forget everything about `source`
    async fn remove(&self, source: &str);
}

#[derive(Debug, Clone, Default)]
struct SourceOutput {
    latest: Option<RenderedFrame>,
    last_error: Option<FrameFailure>,
}

/// Last good output per live source, keyed by source name
pub struct OutputCache {
    cache: Arc<RwLock<HashMap<String, SourceOutput>>>,
}

impl OutputCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Latest successfully rendered frame for a source
    pub async fn latest(&self, source: &str) -> Option<RenderedFrame> {
        let cache = self.cache.read().await;
        cache.get(source).and_then(|o| o.latest.clone())
    }

    /// Most recent failure for a source, if any frame failed
    pub async fn last_error(&self, source: &str) -> Option<FrameFailure> {
        let cache = self.cache.read().await;
        cache.get(source).and_then(|o| o.last_error.clone())
    }
}

impl Default for OutputCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameSink for OutputCache {
    async fn publish(&self, source: &str, frame: RenderedFrame) {
        let mut cache = self.cache.write().await;
        let entry = cache.entry(source.to_string()).or_default();
        entry.latest = Some(frame);
    }

    async fn record_failure(&self, source: &str, failure: FrameFailure) {
        let mut cache = self.cache.write().await;
        let entry = cache.entry(source.to_string()).or_default();
        entry.last_error = Some(failure);
    }

    async fn remove(&self, source: &str) {
        let mut cache = self.cache.write().await;
        cache.remove(source);
    }
}
