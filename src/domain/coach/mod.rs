//! Mock QA coach conversation.
//!
//! A three-prompt scripted dialogue that asks the officer to explain their
//! decision, then hands back a recommendation checklist. Speech is simulated
//! behind [`crate::ports::SpeechSynthesizer`] and
//! [`crate::ports::TranscriptionProvider`].

mod errors;
mod prompts;
mod recommendations;
mod session;
mod state;
mod transcript;

pub use errors::CoachError;
pub use prompts::{coach_prompt, template_index, CLOSING_REMARK};
pub use recommendations::{generate_recommendations, Priority, Recommendation};
pub use session::CoachSession;
pub use state::{CoachState, LAST_TURN};
pub use transcript::{render_transcript, transcript_filename, ConversationTurn, Speaker};
