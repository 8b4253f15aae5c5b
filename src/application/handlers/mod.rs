//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod coach;
pub mod quality;

pub use coach::{
    CoachCommandError, CompletePlaybackCommand, CompletePlaybackHandler, CompletePlaybackResult,
    GetCoachSessionHandler, GetCoachSessionQuery, StartCoachSessionCommand,
    StartCoachSessionHandler, StartCoachSessionResult, SubmitRecordingCommand,
    SubmitRecordingHandler, SubmitRecordingResult, ToggleRecommendationCommand,
    ToggleRecommendationHandler, ToggleRecommendationResult, TRANSCRIPTION_FAILED_NOTICE,
};
pub use quality::{
    QualityCheckError, QualityCheckOutcome, QualityCheckSettings, RunQualityCheckCommand,
    RunQualityCheckHandler,
};
