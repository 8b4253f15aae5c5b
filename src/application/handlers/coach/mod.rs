//! Coach session command handlers.

mod complete_playback;
mod errors;
mod get_coach_session;
mod start_coach_session;
mod submit_recording;
mod toggle_recommendation;
mod voice;

pub use complete_playback::{CompletePlaybackCommand, CompletePlaybackHandler, CompletePlaybackResult};
pub use errors::CoachCommandError;
pub use get_coach_session::{GetCoachSessionHandler, GetCoachSessionQuery};
pub use start_coach_session::{
    StartCoachSessionCommand, StartCoachSessionHandler, StartCoachSessionResult,
};
pub use submit_recording::{
    SubmitRecordingCommand, SubmitRecordingHandler, SubmitRecordingResult,
    TRANSCRIPTION_FAILED_NOTICE,
};
pub use toggle_recommendation::{
    ToggleRecommendationCommand, ToggleRecommendationHandler, ToggleRecommendationResult,
};
