//! HTTP adapter for coach session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CoachSessionView, ProgressView};
pub use handlers::CoachHandlers;
pub use routes::coach_routes;
