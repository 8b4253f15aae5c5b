//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    // Quality review
    QualityCheckError, QualityCheckOutcome, QualityCheckSettings, RunQualityCheckCommand,
    RunQualityCheckHandler,
    // Coach sessions
    CoachCommandError, CompletePlaybackCommand, CompletePlaybackHandler, CompletePlaybackResult,
    GetCoachSessionHandler, GetCoachSessionQuery, StartCoachSessionCommand,
    StartCoachSessionHandler, StartCoachSessionResult, SubmitRecordingCommand,
    SubmitRecordingHandler, SubmitRecordingResult, ToggleRecommendationCommand,
    ToggleRecommendationHandler, ToggleRecommendationResult, TRANSCRIPTION_FAILED_NOTICE,
};
