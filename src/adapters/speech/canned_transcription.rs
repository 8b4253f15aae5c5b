//! Simulated transcription.
//!
//! Waits out a fixed latency and returns one of a few canned answers. The
//! answer choice is injectable so tests get deterministic conversations.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AudioClip, SpeechError, TranscriptionProvider};

/// Answers a loan officer might plausibly give to the coach.
pub const CANNED_TRANSCRIPTS: [&str; 3] = [
    "I approved the loan because the credit score of 720 is above our minimum threshold and the debt-to-income ratio is reasonable at 28%. The applicant has stable employment for over 3 years.",
    "Yes, I considered the loan-to-value ratio. With a home value of $500,000 and loan amount of $450,000, the LTV is 90%, which is within our guidelines for this credit profile.",
    "I think the main risks are the relatively short employment history and the high loan amount relative to income. But the strong credit score and down payment help mitigate these concerns.",
];

#[derive(Debug, Clone)]
enum Script {
    Random,
    Fixed(String),
    Sequential(Vec<String>),
}

/// Transcription provider that never listens to the audio.
#[derive(Debug, Clone)]
pub struct CannedTranscriptionProvider {
    script: Script,
    delay: Duration,
    calls: Arc<AtomicUsize>,
    failures_remaining: Arc<AtomicUsize>,
}

impl CannedTranscriptionProvider {
    /// Picks one of [`CANNED_TRANSCRIPTS`] at random on every call.
    pub fn random() -> Self {
        Self::with_script(Script::Random)
    }

    /// Always returns `text`.
    pub fn fixed(text: impl Into<String>) -> Self {
        Self::with_script(Script::Fixed(text.into()))
    }

    /// Returns `texts` in order, wrapping around at the end.
    ///
    /// An empty list falls back to the canned answers in order.
    pub fn sequential<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut texts: Vec<String> = texts.into_iter().map(Into::into).collect();
        if texts.is_empty() {
            texts = CANNED_TRANSCRIPTS.iter().map(|t| t.to_string()).collect();
        }
        Self::with_script(Script::Sequential(texts))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
            failures_remaining: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the simulated transcription latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes the next `count` calls fail.
    pub fn failing_next(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Number of transcription attempts so far, failed ones included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn pick(&self, call: usize) -> String {
        match &self.script {
            Script::Random => {
                use rand::Rng;
                let idx = rand::thread_rng().gen_range(0..CANNED_TRANSCRIPTS.len());
                CANNED_TRANSCRIPTS[idx].to_string()
            }
            Script::Fixed(text) => text.clone(),
            Script::Sequential(texts) => texts[call % texts.len()].clone(),
        }
    }
}

impl Default for CannedTranscriptionProvider {
    fn default() -> Self {
        Self::random()
    }
}

#[async_trait]
impl TranscriptionProvider for CannedTranscriptionProvider {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SpeechError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        if clip.is_empty() {
            return Err(SpeechError::Transcription("recording is empty".to_string()));
        }
        if self.take_failure() {
            return Err(SpeechError::Transcription(
                "simulated transcription failure".to_string(),
            ));
        }

        Ok(self.pick(call))
    }
}
