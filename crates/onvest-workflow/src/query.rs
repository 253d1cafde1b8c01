//! Admin read models and query filters.
//!
//! Listing endpoints return an application joined with its review
//! task. The join runs in memory over fetched rows; queue sizes here
//! are dozens, not millions.

use chrono::{DateTime, Utc};
use onvest_core::models::application::{ApplicationStatus, OnboardingApplication};
use onvest_core::models::task::{AdminTask, TaskStatus};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WorkflowError;

/// Queue/list view of an application and its task state.
///
/// Task fields are `None` only when the paired task is missing, which
/// the engine tolerates but never creates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApplicationSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub submission_date: DateTime<Utc>,
    pub application_status: ApplicationStatus,
    pub task_id: Option<Uuid>,
    pub task_status: Option<TaskStatus>,
    pub assigned_to_employee_id: Option<Uuid>,
}

impl ApplicationSummary {
    pub fn new(application: &OnboardingApplication, task: Option<&AdminTask>) -> Self {
        Self {
            id: application.id,
            user_id: application.user_id,
            full_name: application.full_name.clone(),
            submission_date: application.submission_date,
            application_status: application.status,
            task_id: task.map(|t| t.id),
            task_status: task.map(|t| t.status),
            assigned_to_employee_id: task.and_then(|t| t.assigned_to_employee_id),
        }
    }
}

/// Full application content plus review state, for the admin detail
/// view.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: OnboardingApplication,
    pub task_id: Option<Uuid>,
    pub task_status: Option<TaskStatus>,
    pub assigned_to_employee_id: Option<Uuid>,
}

impl ApplicationDetail {
    pub fn new(application: OnboardingApplication, task: Option<AdminTask>) -> Self {
        Self {
            task_id: task.as_ref().map(|t| t.id),
            task_status: task.as_ref().map(|t| t.status),
            assigned_to_employee_id: task.as_ref().and_then(|t| t.assigned_to_employee_id),
            application,
        }
    }
}

/// Review-status dimension of the admin list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(ApplicationStatus),
}

impl StatusFilter {
    /// Parse a query-string value. `all` and the three statuses are
    /// accepted; anything else is rejected.
    pub fn parse(s: &str) -> Result<Self, WorkflowError> {
        if s == "all" {
            return Ok(StatusFilter::All);
        }
        ApplicationStatus::parse(s)
            .map(StatusFilter::Status)
            .ok_or(WorkflowError::InvalidFilter("status"))
    }

    fn matches(&self, summary: &ApplicationSummary) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => summary.application_status == *status,
        }
    }
}

/// Assignment dimension of the admin list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignmentFilter {
    #[default]
    All,
    Assigned,
    Unassigned,
}

impl AssignmentFilter {
    pub fn parse(s: &str) -> Result<Self, WorkflowError> {
        match s {
            "all" => Ok(AssignmentFilter::All),
            "assigned" => Ok(AssignmentFilter::Assigned),
            "unassigned" => Ok(AssignmentFilter::Unassigned),
            _ => Err(WorkflowError::InvalidFilter("assignment")),
        }
    }

    fn matches(&self, summary: &ApplicationSummary) -> bool {
        match self {
            AssignmentFilter::All => true,
            AssignmentFilter::Assigned => summary.assigned_to_employee_id.is_some(),
            AssignmentFilter::Unassigned => summary.assigned_to_employee_id.is_none(),
        }
    }
}

/// Combined admin list filter. Dimensions compose with AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplicationFilter {
    pub status: StatusFilter,
    pub assignment: AssignmentFilter,
}

impl ApplicationFilter {
    pub fn matches(&self, summary: &ApplicationSummary) -> bool {
        self.status.matches(summary) && self.assignment.matches(summary)
    }
}
