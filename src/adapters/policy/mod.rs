//! Policy document adapters.

mod sop_file;

pub use sop_file::{load_sop, SopLoadError};
