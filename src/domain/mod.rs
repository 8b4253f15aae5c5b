//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `loan` - The loan decision under review
//! - `quality` - SOP-based quality review prompts and results
//! - `coach` - Scripted QA coach conversation and recommendations

pub mod coach;
pub mod foundation;
pub mod loan;
pub mod quality;
