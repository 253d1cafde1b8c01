//! Workflow error types.

use onvest_core::error::OnvestError;
use thiserror::Error;

/// Workflow-layer error type.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("missing required document: {0}")]
    MissingDocument(&'static str),

    #[error("terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("malformed {field}: {reason}")]
    MalformedField {
        field: &'static str,
        reason: String,
    },

    #[error("invalid status: must be pending, approved, or rejected")]
    InvalidStatus,

    #[error("invalid {0} filter")]
    InvalidFilter(&'static str),

    #[error("document storage error: {0}")]
    Storage(String),
}

impl From<WorkflowError> for OnvestError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Storage(msg) => OnvestError::Storage(msg),
            other => OnvestError::Validation {
                message: other.to_string(),
            },
        }
    }
}
