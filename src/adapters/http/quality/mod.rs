//! HTTP adapter for quality review endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ValidationProblem, ValidationReport};
pub use handlers::QualityHandlers;
pub use routes::quality_routes;
