//! Authentication extractors.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use onvest_core::error::OnvestError;
use onvest_core::models::user::{PublicUser, UserRole};
use surrealdb::Connection;

use crate::AppState;
use crate::error::ApiError;

/// The authenticated caller, extracted from the `Authorization` header.
///
/// A missing or malformed header is a 401; a token that fails
/// verification is a 403.
pub struct AuthUser(pub PublicUser);

impl<C: Connection> FromRequestParts<Arc<AppState<C>>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<C>>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(OnvestError::AuthenticationFailed {
                    reason: "missing bearer token".to_string(),
                })
            })?;

        let user = state.auth.verify(token)?;
        Ok(AuthUser(user))
    }
}

/// An authenticated caller holding the `admin` role.
pub struct AdminUser(pub PublicUser);

impl<C: Connection> FromRequestParts<Arc<AppState<C>>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<C>>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        if user.role != UserRole::Admin {
            return Err(ApiError(OnvestError::AuthorizationDenied {
                reason: "admin role required".to_string(),
            }));
        }
        Ok(AdminUser(user))
    }
}
