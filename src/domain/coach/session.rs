//! Coach session aggregate.
//!
//! One scripted QA conversation about one submitted loan decision. The
//! session owns its conversation and recommendations; every change goes
//! through an event method that validates the state transition first, so a
//! rejected event leaves the session untouched.
//!
//! # Versioning
//!
//! `version` counts successful saves. Event methods never touch it; the
//! session store advances it when a save is accepted.

use super::errors::CoachError;
use super::prompts::{coach_prompt, CLOSING_REMARK};
use super::recommendations::{generate_recommendations, Recommendation};
use super::state::{CoachState, LAST_TURN};
use super::transcript::{render_transcript, transcript_filename, ConversationTurn, Speaker};
use crate::domain::foundation::{CoachSessionId, StateMachine, Timestamp, TransitionError};
use crate::domain::loan::LoanDecision;

#[derive(Debug, Clone, PartialEq)]
pub struct CoachSession {
    id: CoachSessionId,
    decision: LoanDecision,
    state: CoachState,
    conversation: Vec<ConversationTurn>,
    recommendations: Vec<Recommendation>,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl CoachSession {
    /// Creates a session that has not yet asked anything.
    pub fn new(id: CoachSessionId, decision: LoanDecision) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            decision,
            state: CoachState::NotStarted,
            conversation: Vec::new(),
            recommendations: Vec::new(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CoachSessionId {
        &self.id
    }

    pub fn decision(&self) -> &LoanDecision {
        &self.decision
    }

    pub fn state(&self) -> CoachState {
        self.state
    }

    pub fn conversation(&self) -> &[ConversationTurn] {
        &self.conversation
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        &self.recommendations
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// The most recent coach line, which is what gets spoken next.
    pub fn last_coach_turn(&self) -> Option<&ConversationTurn> {
        self.conversation
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Coach)
    }

    /// Number of scripted prompts asked so far, excluding the closing remark.
    pub fn prompts_asked(&self) -> usize {
        let coach_turns = self
            .conversation
            .iter()
            .filter(|t| t.speaker == Speaker::Coach)
            .count();
        match self.state {
            CoachState::Closing | CoachState::Completed => coach_turns.saturating_sub(1),
            _ => coach_turns,
        }
    }

    /// Completed and total recommendation counts.
    pub fn recommendation_progress(&self) -> (usize, usize) {
        let done = self.recommendations.iter().filter(|r| r.completed).count();
        (done, self.recommendations.len())
    }

    pub fn transcript(&self) -> String {
        render_transcript(&self.conversation)
    }

    pub fn transcript_filename(&self) -> String {
        transcript_filename(self.decision.applicant_name(), &Timestamp::now())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Events
    // ─────────────────────────────────────────────────────────────────────────

    /// Asks the first prompt.
    pub fn start(&mut self) -> Result<(), CoachError> {
        let next = self
            .state
            .transition_to(CoachState::Prompting { turn: 0 }, "start")?;
        self.state = next;
        self.push_coach(coach_prompt(0, &self.decision));
        Ok(())
    }

    /// Playback of the current coach line finished.
    ///
    /// After a prompt the coach listens; after the closing remark the session
    /// completes and recommendations are generated.
    pub fn finish_playback(&mut self) -> Result<(), CoachError> {
        const EVENT: &str = "finish playback";
        let target = match self.state {
            CoachState::Prompting { turn } => CoachState::Listening { turn },
            CoachState::Closing => CoachState::Completed,
            other => return Err(TransitionError::new(other.to_string(), EVENT).into()),
        };
        self.state = self.state.transition_to(target, EVENT)?;
        if self.state.is_completed() {
            self.recommendations = generate_recommendations(&self.decision);
        }
        self.touch();
        Ok(())
    }

    /// A recording arrived and is about to be transcribed.
    pub fn begin_processing(&mut self) -> Result<(), CoachError> {
        const EVENT: &str = "submit a recording";
        let target = match self.state {
            CoachState::Listening { turn } => CoachState::Processing { turn },
            other => return Err(TransitionError::new(other.to_string(), EVENT).into()),
        };
        self.state = self.state.transition_to(target, EVENT)?;
        self.touch();
        Ok(())
    }

    /// Records the transcribed answer and moves to the next coach line.
    pub fn record_answer(&mut self, transcript: impl Into<String>) -> Result<(), CoachError> {
        const EVENT: &str = "record an answer";
        let target = match self.state {
            CoachState::Processing { turn } if turn < LAST_TURN => {
                CoachState::Prompting { turn: turn + 1 }
            }
            CoachState::Processing { .. } => CoachState::Closing,
            other => return Err(TransitionError::new(other.to_string(), EVENT).into()),
        };
        self.state = self.state.transition_to(target, EVENT)?;

        self.conversation.push(ConversationTurn::user(transcript));
        let line = match target {
            CoachState::Prompting { turn } => coach_prompt(turn, &self.decision),
            _ => CLOSING_REMARK.to_string(),
        };
        self.push_coach(line);
        Ok(())
    }

    /// Transcription failed; go back to listening on the same turn.
    pub fn abandon_processing(&mut self) -> Result<(), CoachError> {
        const EVENT: &str = "abandon transcription";
        let target = match self.state {
            CoachState::Processing { turn } => CoachState::Listening { turn },
            other => return Err(TransitionError::new(other.to_string(), EVENT).into()),
        };
        self.state = self.state.transition_to(target, EVENT)?;
        self.touch();
        Ok(())
    }

    /// Attaches synthesized audio to the latest coach line.
    ///
    /// Does nothing when the latest turn is not the coach's or already has audio.
    pub fn attach_audio(&mut self, audio_url: impl Into<String>) {
        if let Some(turn) = self.conversation.last_mut() {
            if turn.speaker == Speaker::Coach && turn.audio_url.is_none() {
                turn.audio_url = Some(audio_url.into());
                self.touch();
            }
        }
    }

    /// Flips a recommendation's completed flag, returning the new value.
    pub fn toggle_recommendation(&mut self, recommendation_id: &str) -> Result<bool, CoachError> {
        if !self.state.is_completed() {
            return Err(CoachError::NotCompleted);
        }
        let item = self
            .recommendations
            .iter_mut()
            .find(|r| r.id == recommendation_id)
            .ok_or_else(|| CoachError::RecommendationNotFound(recommendation_id.to_string()))?;
        item.completed = !item.completed;
        let completed = item.completed;
        self.touch();
        Ok(completed)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy of this session as the store records it after an accepted save.
    pub fn with_next_version(&self) -> Self {
        let mut saved = self.clone();
        saved.version += 1;
        saved
    }

    fn push_coach(&mut self, message: String) {
        self.conversation.push(ConversationTurn::coach(message));
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::loan::{fixtures, DecisionOutcome, RiskLevel};

    fn session() -> CoachSession {
        CoachSession::new(CoachSessionId::new(), fixtures::reference_decision())
    }

    fn answer_turn(s: &mut CoachSession, answer: &str) {
        s.finish_playback().unwrap();
        s.begin_processing().unwrap();
        s.record_answer(answer).unwrap();
    }

    fn completed_session() -> CoachSession {
        let mut s = session();
        s.start().unwrap();
        for answer in ["a", "b", "c"] {
            answer_turn(&mut s, answer);
        }
        s.finish_playback().unwrap();
        s
    }

    #[test]
    fn new_session_is_not_started() {
        let s = session();
        assert_eq!(s.state(), CoachState::NotStarted);
        assert!(s.conversation().is_empty());
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn start_asks_first_prompt() {
        let mut s = session();
        s.start().unwrap();
        assert_eq!(s.state(), CoachState::Prompting { turn: 0 });
        assert_eq!(s.conversation().len(), 1);
        assert!(s.conversation()[0].message.contains("for approving this loan for Sarah Chen"));
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut s = session();
        s.start().unwrap();
        let before = s.clone();
        assert!(matches!(s.start(), Err(CoachError::InvalidTransition(_))));
        assert_eq!(s, before);
    }

    #[test]
    fn full_conversation_asks_three_prompts_then_closes() {
        let s = completed_session();
        assert_eq!(s.state(), CoachState::Completed);

        let speakers: Vec<Speaker> = s.conversation().iter().map(|t| t.speaker).collect();
        use Speaker::*;
        assert_eq!(speakers, vec![Coach, User, Coach, User, Coach, User, Coach]);
        assert_eq!(s.prompts_asked(), 3);
        assert_eq!(s.conversation().last().unwrap().message, CLOSING_REMARK);
        assert_eq!(s.recommendations().len(), 4);
    }

    #[test]
    fn closing_waits_for_playback_before_recommendations() {
        let mut s = session();
        s.start().unwrap();
        for answer in ["a", "b", "c"] {
            answer_turn(&mut s, answer);
        }
        assert_eq!(s.state(), CoachState::Closing);
        assert!(s.recommendations().is_empty());
    }

    #[test]
    fn recording_while_prompting_is_rejected_without_change() {
        let mut s = session();
        s.start().unwrap();
        let before = s.clone();
        let err = s.begin_processing().unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot submit a recording while prompting (turn 0)"
        );
        assert_eq!(s, before);
    }

    #[test]
    fn answer_outside_processing_is_rejected() {
        let mut s = session();
        s.start().unwrap();
        s.finish_playback().unwrap();
        let before = s.clone();
        assert!(s.record_answer("too early").is_err());
        assert_eq!(s, before);
    }

    #[test]
    fn abandoned_processing_returns_to_same_turn() {
        let mut s = session();
        s.start().unwrap();
        answer_turn(&mut s, "first");
        s.finish_playback().unwrap();
        s.begin_processing().unwrap();
        s.abandon_processing().unwrap();
        assert_eq!(s.state(), CoachState::Listening { turn: 1 });
        assert_eq!(s.conversation().len(), 3);

        s.begin_processing().unwrap();
        s.record_answer("second").unwrap();
        assert_eq!(s.state(), CoachState::Prompting { turn: 2 });
    }

    #[test]
    fn attach_audio_targets_latest_coach_line() {
        let mut s = session();
        s.start().unwrap();
        s.attach_audio("data:audio/wav;base64,x");
        assert_eq!(
            s.conversation()[0].audio_url.as_deref(),
            Some("data:audio/wav;base64,x")
        );

        s.attach_audio("second");
        assert_eq!(
            s.conversation()[0].audio_url.as_deref(),
            Some("data:audio/wav;base64,x")
        );
    }

    #[test]
    fn toggle_requires_completed_session() {
        let mut s = session();
        s.start().unwrap();
        assert_eq!(s.toggle_recommendation("1"), Err(CoachError::NotCompleted));
    }

    #[test]
    fn toggle_flips_and_reports_progress() {
        let mut s = completed_session();
        assert_eq!(s.recommendation_progress(), (0, 4));
        assert_eq!(s.toggle_recommendation("2"), Ok(true));
        assert_eq!(s.recommendation_progress(), (1, 4));
        assert_eq!(s.toggle_recommendation("2"), Ok(false));
        assert_eq!(s.recommendation_progress(), (0, 4));
    }

    #[test]
    fn toggle_unknown_recommendation_fails() {
        let mut s = completed_session();
        assert_eq!(
            s.toggle_recommendation("4"),
            Err(CoachError::RecommendationNotFound("4".to_string()))
        );
    }

    #[test]
    fn conditional_decision_gets_timeline_recommendation() {
        let decision = fixtures::decision_with(DecisionOutcome::Conditional, RiskLevel::Low);
        let mut s = CoachSession::new(CoachSessionId::new(), decision);
        s.start().unwrap();
        for answer in ["a", "b", "c"] {
            answer_turn(&mut s, answer);
        }
        s.finish_playback().unwrap();
        let ids: Vec<&str> = s.recommendations().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn with_next_version_advances_counter_only() {
        let s = session();
        let saved = s.with_next_version();
        assert_eq!(saved.version(), 1);
        assert_eq!(saved.state(), s.state());
        assert_eq!(saved.id(), s.id());
    }

    #[test]
    fn transcript_contains_every_turn_in_order() {
        let s = completed_session();
        let text = s.transcript();
        let blocks: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(blocks.len(), 7);
        assert!(blocks[0].contains("] COACH: I'd like to understand"));
        assert!(blocks[1].ends_with("] USER: a"));
        assert!(blocks[6].ends_with(CLOSING_REMARK));
        assert!(s.transcript_filename().starts_with("qa-session-Sarah Chen-"));
    }
}
