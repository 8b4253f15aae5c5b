//! Speech ports for the coach conversation.
//!
//! The coach speaks its prompts and listens to the officer's answers. Both
//! directions are simulated today; these ports keep the session logic free of
//! any particular speech backend.

use async_trait::async_trait;

/// Errors from speech synthesis or transcription.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),
}

/// A recorded answer waiting to be transcribed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    bytes: Vec<u8>,
    content_type: Option<String>,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Turns recorded audio into text.
#[async_trait]
pub trait TranscriptionProvider: Send + Sync {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SpeechError>;
}

/// Turns coach text into playable audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Returns a reference the client can play, such as a data URL.
    async fn synthesize(&self, text: &str) -> Result<String, SpeechError>;
}
