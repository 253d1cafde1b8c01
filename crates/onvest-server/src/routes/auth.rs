//! Signup, login, and the authenticated dashboard.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use onvest_core::models::user::PublicUser;
use serde::{Deserialize, Serialize};
use surrealdb::Connection;
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::AuthUser;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

pub async fn signup<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let user_id = state
        .auth
        .signup(&request.username, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user_id,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    pub user: PublicUser,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}

pub async fn login<C: Connection>(
    State(state): State<Arc<AppState<C>>>,
    Json(request): Json<CredentialsRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let output = state
        .auth
        .login(&request.username, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        user: output.user,
        expires_in: output.expires_in,
    }))
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: &'static str,
    pub user: PublicUser,
}

pub async fn dashboard(AuthUser(user): AuthUser) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        message: "Welcome to the dashboard!",
        user,
    })
}
