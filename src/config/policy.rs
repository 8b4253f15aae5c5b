//! Policy document configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// Path to the SOP markdown file
    #[serde(default = "default_sop_path")]
    pub sop_path: PathBuf,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sop_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingSopPath);
        }
        Ok(())
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sop_path: default_sop_path(),
        }
    }
}

fn default_sop_path() -> PathBuf {
    PathBuf::from("policy/loan_decisioning_sop.md")
}
