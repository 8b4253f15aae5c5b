//! Quality review of loan decisions against the SOP.
//!
//! Prompt construction, interpretation of the model's reply, and the fixed
//! degraded result live here. The remote call itself goes through
//! [`crate::ports::AIProvider`].

mod assessment;
mod issue;
mod policy;
mod prompt;
mod result;

pub use assessment::{generated_issue_id, parse_assessment, MalformedAssessment};
pub use issue::{IssueCategory, QualityCheckIssue, Severity};
pub use policy::SopDocument;
pub use prompt::{system_prompt, user_prompt};
pub use result::{QualityCheckResult, DEGRADED_ISSUE_ID};
