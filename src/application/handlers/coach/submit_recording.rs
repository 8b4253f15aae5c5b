//! SubmitRecordingHandler - Transcribes the officer's answer and moves on.
//!
//! The session is saved in Processing before transcription starts, so a
//! second recording for the same turn is rejected while the first is still
//! being transcribed. The rest of the turn runs in a spawned task, so a
//! request dropped mid-transcription (timeout, disconnect) still moves the
//! session out of Processing. A failed transcription returns the session to
//! Listening on the same turn with a notice for the client.

use std::sync::Arc;
use tracing::{info, warn};

use super::errors::CoachCommandError;
use super::voice::voice_latest_line;
use crate::domain::coach::CoachSession;
use crate::domain::foundation::CoachSessionId;
use crate::ports::{AudioClip, CoachSessionStore, SpeechSynthesizer, TranscriptionProvider};

/// Shown to the officer when their answer could not be transcribed.
pub const TRANSCRIPTION_FAILED_NOTICE: &str =
    "We couldn't make out that answer. Please record it again.";

#[derive(Debug, Clone)]
pub struct SubmitRecordingCommand {
    pub session_id: CoachSessionId,
    pub clip: AudioClip,
}

#[derive(Debug, Clone)]
pub struct SubmitRecordingResult {
    pub session: CoachSession,
    /// Set when the answer was not accepted and should be recorded again.
    pub notice: Option<String>,
}

pub struct SubmitRecordingHandler {
    store: Arc<dyn CoachSessionStore>,
    transcriber: Arc<dyn TranscriptionProvider>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl SubmitRecordingHandler {
    pub fn new(
        store: Arc<dyn CoachSessionStore>,
        transcriber: Arc<dyn TranscriptionProvider>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            store,
            transcriber,
            synthesizer,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitRecordingCommand,
    ) -> Result<SubmitRecordingResult, CoachCommandError> {
        // 1. Claim the turn
        let mut session = self.store.load(&cmd.session_id).await?;
        session.begin_processing()?;
        let session = self.store.save(&session).await?;

        // 2. Transcribe and answer, detached from the request
        let turn = tokio::spawn(finish_turn(
            session,
            cmd.clip,
            self.store.clone(),
            self.transcriber.clone(),
            self.synthesizer.clone(),
        ));

        turn.await
            .map_err(|e| CoachCommandError::Interrupted(e.to_string()))?
    }
}

async fn finish_turn(
    mut session: CoachSession,
    clip: AudioClip,
    store: Arc<dyn CoachSessionStore>,
    transcriber: Arc<dyn TranscriptionProvider>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
) -> Result<SubmitRecordingResult, CoachCommandError> {
    match transcriber.transcribe(&clip).await {
        Ok(transcript) => {
            session.record_answer(transcript)?;
            voice_latest_line(synthesizer.as_ref(), &mut session).await;
            let session = store.save(&session).await?;

            info!(
                session_id = %session.id(),
                state = %session.state(),
                bytes = clip.len(),
                "Coach answer recorded"
            );
            Ok(SubmitRecordingResult {
                session,
                notice: None,
            })
        }
        Err(e) => {
            warn!(
                session_id = %session.id(),
                state = %session.state(),
                error = %e,
                "Transcription failed, returning to listening"
            );
            session.abandon_processing()?;
            let session = store.save(&session).await?;
            Ok(SubmitRecordingResult {
                session,
                notice: Some(TRANSCRIPTION_FAILED_NOTICE.to_string()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::speech::{CannedTranscriptionProvider, MockSpeechSynthesizer};
    use crate::adapters::storage::InMemoryCoachSessionStore;
    use crate::domain::coach::{CoachError, CoachState, Speaker, CLOSING_REMARK};
    use crate::domain::loan::fixtures;

    fn clip() -> AudioClip {
        AudioClip::new(vec![7u8; 32], Some("audio/webm".to_string()))
    }

    async fn listening_session(store: &InMemoryCoachSessionStore) -> CoachSession {
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        session.finish_playback().unwrap();
        store.insert(&session).await.unwrap()
    }

    fn handler(
        store: Arc<InMemoryCoachSessionStore>,
        transcriber: CannedTranscriptionProvider,
    ) -> SubmitRecordingHandler {
        SubmitRecordingHandler::new(store, Arc::new(transcriber), Arc::new(MockSpeechSynthesizer::new()))
    }

    #[tokio::test]
    async fn answer_is_recorded_and_next_prompt_asked() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = listening_session(&store).await;
        let handler = handler(store, CannedTranscriptionProvider::fixed("Credit is strong."));

        let result = handler
            .handle(SubmitRecordingCommand {
                session_id: *session.id(),
                clip: clip(),
            })
            .await
            .unwrap();

        assert!(result.notice.is_none());
        let session = result.session;
        assert_eq!(session.state(), CoachState::Prompting { turn: 1 });
        assert_eq!(session.conversation()[1].speaker, Speaker::User);
        assert_eq!(session.conversation()[1].message, "Credit is strong.");
        assert!(session.conversation()[2].audio_url.is_some());
        // insert, processing, answer
        assert_eq!(session.version(), 3);
    }

    #[tokio::test]
    async fn last_answer_closes_conversation() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        for answer in ["a", "b"] {
            session.finish_playback().unwrap();
            session.begin_processing().unwrap();
            session.record_answer(answer).unwrap();
        }
        session.finish_playback().unwrap();
        let session = store.insert(&session).await.unwrap();
        let handler = handler(store, CannedTranscriptionProvider::fixed("c"));

        let session = handler
            .handle(SubmitRecordingCommand {
                session_id: *session.id(),
                clip: clip(),
            })
            .await
            .unwrap()
            .session;

        assert_eq!(session.state(), CoachState::Closing);
        assert_eq!(session.conversation().last().unwrap().message, CLOSING_REMARK);
    }

    #[tokio::test]
    async fn transcription_failure_returns_to_listening_with_notice() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = listening_session(&store).await;
        let handler = handler(
            store.clone(),
            CannedTranscriptionProvider::fixed("unused").failing_next(1),
        );

        let result = handler
            .handle(SubmitRecordingCommand {
                session_id: *session.id(),
                clip: clip(),
            })
            .await
            .unwrap();

        assert_eq!(result.notice.as_deref(), Some(TRANSCRIPTION_FAILED_NOTICE));
        assert_eq!(result.session.state(), CoachState::Listening { turn: 0 });
        assert_eq!(result.session.conversation().len(), 1);
        assert_eq!(store.load(session.id()).await.unwrap(), result.session);
    }

    #[tokio::test]
    async fn recording_while_prompting_is_rejected() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let mut session = CoachSession::new(CoachSessionId::new(), fixtures::reference_decision());
        session.start().unwrap();
        let session = store.insert(&session).await.unwrap();
        let transcriber = CannedTranscriptionProvider::fixed("x");
        let handler = SubmitRecordingHandler::new(
            store,
            Arc::new(transcriber.clone()),
            Arc::new(MockSpeechSynthesizer::new()),
        );

        let err = handler
            .handle(SubmitRecordingCommand {
                session_id: *session.id(),
                clip: clip(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoachCommandError::Domain(CoachError::InvalidTransition(_))
        ));
        assert_eq!(transcriber.call_count(), 0);
    }

    #[tokio::test]
    async fn second_recording_during_processing_is_rejected() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = listening_session(&store).await;
        let handler = Arc::new(handler(
            store.clone(),
            CannedTranscriptionProvider::fixed("x")
                .with_delay(std::time::Duration::from_millis(200)),
        ));

        let first = {
            let handler = handler.clone();
            let id = *session.id();
            tokio::spawn(async move {
                handler
                    .handle(SubmitRecordingCommand {
                        session_id: id,
                        clip: clip(),
                    })
                    .await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let second = handler
            .handle(SubmitRecordingCommand {
                session_id: *session.id(),
                clip: clip(),
            })
            .await;
        assert!(matches!(
            second,
            Err(CoachCommandError::Domain(CoachError::InvalidTransition(_)))
        ));

        let first = first.await.unwrap().unwrap();
        assert_eq!(first.session.state(), CoachState::Prompting { turn: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_request_still_finishes_the_turn() {
        let store = Arc::new(InMemoryCoachSessionStore::new());
        let session = listening_session(&store).await;
        let handler = Arc::new(handler(
            store.clone(),
            CannedTranscriptionProvider::fixed("Income covers the payment.")
                .with_delay(std::time::Duration::from_millis(500)),
        ));

        let request = {
            let handler = handler.clone();
            let id = *session.id();
            tokio::spawn(async move {
                handler
                    .handle(SubmitRecordingCommand {
                        session_id: id,
                        clip: clip(),
                    })
                    .await
            })
        };
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        assert!(matches!(
            store.load(session.id()).await.unwrap().state(),
            CoachState::Processing { turn: 0 }
        ));
        request.abort();
        assert!(request.await.unwrap_err().is_cancelled());

        tokio::time::sleep(std::time::Duration::from_secs(1)).await;

        let session = store.load(session.id()).await.unwrap();
        assert_eq!(session.state(), CoachState::Prompting { turn: 1 });
        assert_eq!(session.conversation()[1].message, "Income covers the payment.");
    }
}
