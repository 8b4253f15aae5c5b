//! Speech adapters for the coach conversation.
//!
//! - `CannedTranscriptionProvider` - Returns scripted or random canned answers
//! - `MockSpeechSynthesizer` - Returns placeholder audio after a delay

mod canned_transcription;
mod mock_synthesizer;

pub use canned_transcription::{CannedTranscriptionProvider, CANNED_TRANSCRIPTS};
pub use mock_synthesizer::{MockSpeechSynthesizer, MOCK_AUDIO_URL};
