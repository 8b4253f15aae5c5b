//! Gives the latest coach line a voice.

use tracing::warn;

use crate::domain::coach::CoachSession;
use crate::ports::SpeechSynthesizer;

/// Synthesizes the latest coach line and attaches the audio.
///
/// A synthesis failure is logged and the line stays text-only.
pub(super) async fn voice_latest_line(synthesizer: &dyn SpeechSynthesizer, session: &mut CoachSession) {
    let Some(line) = session.last_coach_turn().map(|t| t.message.clone()) else {
        return;
    };

    match synthesizer.synthesize(&line).await {
        Ok(audio_url) => session.attach_audio(audio_url),
        Err(e) => warn!(
            session_id = %session.id(),
            state = %session.state(),
            error = %e,
            "Speech synthesis failed, continuing without audio"
        ),
    }
}
