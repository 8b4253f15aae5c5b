//! Storage adapters.
//!
//! - `InMemoryCoachSessionStore` - Process-local coach session storage with idle eviction

mod in_memory_coach_store;

pub use in_memory_coach_store::{InMemoryCoachSessionStore, SessionRetention};
