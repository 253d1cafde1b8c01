//! Onboarding submission and status lookup.

use std::sync::Arc;

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use onvest_core::error::OnvestError;
use onvest_core::models::application::ApplicationStatus;
use onvest_core::models::user::UserRole;
use onvest_workflow::{SubmissionForm, UploadedDocument};
use serde::Serialize;
use surrealdb::Connection;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::extract::AuthUser;
use crate::routes::parse_uuid;

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub message: &'static str,
    #[serde(rename = "applicationId")]
    pub application_id: Uuid,
    pub status: ApplicationStatus,
}

/// `POST /api/onboarding`: multipart form with the profile fields and
/// the two document parts, `govtIdFile` and `incomeProofFile`.
pub async fn submit<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let mut form = SubmissionForm::default();
    let mut govt_id_file = None;
    let mut income_proof_file = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "govtIdFile" | "incomeProofFile" => {
                let filename = field.file_name().unwrap_or("document").to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
                let document = UploadedDocument { filename, bytes };
                if name == "govtIdFile" {
                    govt_id_file = Some(document);
                } else {
                    income_proof_file = Some(document);
                }
            }
            _ => {
                let value = field.text().await.map_err(bad_multipart)?;
                assign_text_field(&mut form, &name, value);
            }
        }
    }

    let receipt = state
        .engine
        .submit_application(user.id, form, govt_id_file, income_proof_file)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Onboarding application submitted successfully",
            application_id: receipt.application_id,
            status: receipt.status,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct OnboardingStatusResponse {
    pub status: &'static str,
}

/// `GET /api/user/onboarding-status/{user_id}`. The requester may only
/// read their own status unless they are an admin.
pub async fn status<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    AuthUser(user): AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<OnboardingStatusResponse>> {
    let user_id = parse_uuid("user id", &user_id)?;
    if user.id != user_id && user.role != UserRole::Admin {
        return Err(ApiError(OnvestError::AuthorizationDenied {
            reason: "cannot view another user's onboarding status".to_string(),
        }));
    }

    let status = state.engine.onboarding_status(user_id).await?;
    Ok(Json(OnboardingStatusResponse {
        status: match status {
            Some(s) => s.as_str(),
            None => "not_started",
        },
    }))
}

fn bad_multipart(e: MultipartError) -> ApiError {
    ApiError(OnvestError::Validation {
        message: format!("malformed multipart request: {e}"),
    })
}

/// Route a multipart text part to its form slot by wire name. Unknown
/// parts are ignored.
fn assign_text_field(form: &mut SubmissionForm, name: &str, value: String) {
    match name {
        "fullName" => form.full_name = value,
        "govtIdNumber" => form.govt_id_number = value,
        "mobile" => form.mobile = value,
        "email" => form.email = value,
        "timeHorizon" => form.time_horizon = value,
        "riskTolerance" => form.risk_tolerance = value,
        "investmentsOwned" => form.investments_owned = value,
        "acceptableAnnualReturn" => form.acceptable_annual_return = value,
        "dob" => form.dob = value,
        "nationality" => form.nationality = value,
        "address" => form.address = value,
        "clientType" => form.client_type = value,
        "contactDetails" => form.contact_details = value,
        "sourceOfFunds" => form.source_of_funds = value,
        "occupationDetails" => form.occupation_details = value,
        "selectedFunds" => form.selected_funds = value,
        "termsAccepted" => form.terms_accepted = value,
        _ => {}
    }
}
