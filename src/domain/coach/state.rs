//! Coach conversation lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Index of the last scripted coach prompt. Three prompts are asked in total.
pub const LAST_TURN: u8 = 2;

/// Where a coach session is in its scripted conversation.
///
/// Every phase between start and close carries the turn it belongs to, so a
/// session is always in exactly one well-defined place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CoachState {
    #[default]
    NotStarted,
    /// The coach prompt for `turn` is being played back.
    Prompting { turn: u8 },
    /// Waiting for the officer to record an answer.
    Listening { turn: u8 },
    /// A recording is being transcribed.
    Processing { turn: u8 },
    /// The closing remark is being played back.
    Closing,
    Completed,
}

impl CoachState {
    /// Turn index for the phases that have one.
    pub fn turn(&self) -> Option<u8> {
        match self {
            CoachState::Prompting { turn }
            | CoachState::Listening { turn }
            | CoachState::Processing { turn } => Some(*turn),
            _ => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CoachState::Completed)
    }
}

impl fmt::Display for CoachState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoachState::NotStarted => write!(f, "not started"),
            CoachState::Prompting { turn } => write!(f, "prompting (turn {})", turn),
            CoachState::Listening { turn } => write!(f, "listening (turn {})", turn),
            CoachState::Processing { turn } => write!(f, "processing (turn {})", turn),
            CoachState::Closing => write!(f, "closing"),
            CoachState::Completed => write!(f, "completed"),
        }
    }
}

impl StateMachine for CoachState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use CoachState::*;
        match (self, target) {
            (NotStarted, Prompting { turn: 0 }) => true,
            (Prompting { turn: t }, Listening { turn: u }) => t == u,
            (Listening { turn: t }, Processing { turn: u }) => t == u,
            (Processing { turn: t }, Prompting { turn: u }) => *t < LAST_TURN && *u == t + 1,
            (Processing { turn: t }, Closing) => *t == LAST_TURN,
            // Transcription failed; the officer records again.
            (Processing { turn: t }, Listening { turn: u }) => t == u,
            (Closing, Completed) => true,
            _ => false,
        }
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CoachState::*;
        match *self {
            NotStarted => vec![Prompting { turn: 0 }],
            Prompting { turn } => vec![Listening { turn }],
            Listening { turn } => vec![Processing { turn }],
            Processing { turn } if turn < LAST_TURN => {
                vec![Prompting { turn: turn + 1 }, Listening { turn }]
            }
            Processing { turn } => vec![Closing, Listening { turn }],
            Closing => vec![Completed],
            Completed => vec![],
        }
    }
}
