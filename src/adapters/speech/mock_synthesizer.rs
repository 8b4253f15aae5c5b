//! Simulated speech synthesis.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{SpeechError, SpeechSynthesizer};

/// Placeholder audio reference handed to the client.
pub const MOCK_AUDIO_URL: &str = "data:audio/wav;base64,mock-audio-data";

/// Synthesizer that waits out a fixed latency and returns placeholder audio.
#[derive(Debug, Clone)]
pub struct MockSpeechSynthesizer {
    delay: Duration,
    calls: Arc<AtomicUsize>,
    failures_remaining: Arc<AtomicUsize>,
}

impl MockSpeechSynthesizer {
    pub fn new() -> Self {
        Self {
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            failures_remaining: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the simulated playback-preparation latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes the next `count` calls fail.
    pub fn failing_next(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSpeechSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for MockSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<String, SpeechError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let fail = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(SpeechError::Synthesis("simulated synthesis failure".to_string()));
        }
        if text.trim().is_empty() {
            return Err(SpeechError::Synthesis("nothing to say".to_string()));
        }

        Ok(MOCK_AUDIO_URL.to_string())
    }
}
