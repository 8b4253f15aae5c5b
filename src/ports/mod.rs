//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Chat completion used by the quality review
//! - `TranscriptionProvider` / `SpeechSynthesizer` - Coach speech in and out
//! - `CoachSessionStore` - Versioned coach session persistence

mod ai_provider;
mod coach_session_store;
mod speech;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, ResponseFormat, TokenUsage,
};
pub use coach_session_store::{CoachSessionStore, StoreError};
pub use speech::{AudioClip, SpeechError, SpeechSynthesizer, TranscriptionProvider};
