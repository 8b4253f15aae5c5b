//! Request and response DTOs for quality review endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Response body of `POST /api/decisions/validate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub problems: Vec<ValidationProblem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationProblem {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for ValidationProblem {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field().to_string(),
            message: error.to_string(),
        }
    }
}

impl ValidationReport {
    pub fn from_problems(problems: &[ValidationError]) -> Self {
        Self {
            valid: problems.is_empty(),
            problems: problems.iter().map(ValidationProblem::from).collect(),
        }
    }
}
