//! Loan QA Coach - Quality review for mortgage loan decisions
//!
//! Reviews a loan officer's decision against the lending SOP with an AI
//! model, and runs a scripted voice coach that asks the officer to explain
//! their reasoning before handing back a recommendation checklist.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
