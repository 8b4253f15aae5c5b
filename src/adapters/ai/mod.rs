//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Scripted review replies for tests
//! - `OpenAIProvider` - OpenAI-compatible chat completions
//! - `UnconfiguredProvider` - Stand-in when no API key is set

mod mock_provider;
mod openai_provider;
mod unconfigured_provider;

pub use mock_provider::{clean_assessment, MockAIProvider, MockReply, ReviewCall};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use unconfigured_provider::UnconfiguredProvider;
