//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Chat-completion providers (OpenAI, mock, unconfigured)
//! - `http` - axum routers and DTOs
//! - `policy` - SOP document loading
//! - `speech` - Simulated speech synthesis and transcription
//! - `storage` - In-memory coach session store

pub mod ai;
pub mod http;
pub mod policy;
pub mod speech;
pub mod storage;
