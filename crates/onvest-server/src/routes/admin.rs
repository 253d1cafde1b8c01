//! Admin review endpoints. Every handler requires the `admin` role.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use onvest_core::error::OnvestError;
use onvest_core::models::application::ApplicationStatus;
use onvest_core::models::employee::Employee;
use onvest_workflow::{
    ApplicationDetail, ApplicationFilter, ApplicationSummary, AssignmentFilter, StatusFilter,
    WorkflowError,
};
use serde::{Deserialize, Serialize};
use surrealdb::Connection;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::AdminUser;
use crate::routes::parse_uuid;

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub message: &'static str,
}

/// `GET /api/admin/onboarding/pending`: the fresh-arrivals queue.
pub async fn pending<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Vec<ApplicationSummary>>> {
    Ok(Json(state.engine.list_pending().await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub status: Option<String>,
    pub assignment: Option<String>,
}

/// `GET /api/admin/onboarding/applications?status=&assignment=`.
pub async fn applications<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
    Query(params): Query<FilterParams>,
) -> ApiResult<Json<Vec<ApplicationSummary>>> {
    let mut filter = ApplicationFilter::default();
    if let Some(status) = params.status.as_deref() {
        filter.status = StatusFilter::parse(status).map_err(OnvestError::from)?;
    }
    if let Some(assignment) = params.assignment.as_deref() {
        filter.assignment = AssignmentFilter::parse(assignment).map_err(OnvestError::from)?;
    }

    Ok(Json(state.engine.list_applications(filter).await?))
}

/// `GET /api/admin/onboarding/application/{id}`.
pub async fn application_detail<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApplicationDetail>> {
    let application_id = parse_uuid("application id", &id)?;
    Ok(Json(state.engine.application_detail(application_id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    #[serde(rename = "assignedToEmployeeId", default)]
    pub assigned_to_employee_id: String,
}

/// `POST /api/admin/onboarding/application/{id}/assign`.
pub async fn assign<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(request): Json<AssignRequest>,
) -> ApiResult<Json<AckResponse>> {
    let application_id = parse_uuid("application id", &id)?;
    let employee_id = parse_uuid("employee id", &request.assigned_to_employee_id)?;

    state
        .engine
        .assign_employee(application_id, employee_id)
        .await?;

    Ok(Json(AckResponse {
        message: "Employee assigned successfully",
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// `POST /api/admin/onboarding/application/{id}/status`.
pub async fn update_status<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<Json<AckResponse>> {
    let application_id = parse_uuid("application id", &id)?;
    let status = ApplicationStatus::parse(request.status.trim())
        .ok_or_else(|| ApiError(WorkflowError::InvalidStatus.into()))?;

    state.engine.update_status(application_id, status).await?;

    Ok(Json(AckResponse {
        message: "Application status updated",
    }))
}

/// `GET /api/admin/employees`: the assignment roster.
pub async fn employees<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AdminUser(_): AdminUser,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.engine.list_employees().await?))
}
