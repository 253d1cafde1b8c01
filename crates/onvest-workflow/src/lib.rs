//! ONVEST Workflow — the client onboarding engine.
//!
//! Orchestrates submission intake (validation, document staging, atomic
//! persistence), the application/review-task lifecycle, the admin
//! review operations, and workflow change events.

pub mod engine;
pub mod error;
pub mod event;
pub mod query;
pub mod storage;

pub use engine::{OnboardingEngine, SubmissionForm, SubmissionReceipt, UploadedDocument};
pub use error::WorkflowError;
pub use event::{WorkflowEvent, WorkflowEventKind, WorkflowEvents};
pub use query::{
    ApplicationDetail, ApplicationFilter, ApplicationSummary, AssignmentFilter, StatusFilter,
};
pub use storage::DocumentStore;
