//! Quality review handlers.

mod run_quality_check;

pub use run_quality_check::{
    QualityCheckError, QualityCheckOutcome, QualityCheckSettings, RunQualityCheckCommand,
    RunQualityCheckHandler,
};
