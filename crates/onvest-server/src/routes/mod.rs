//! REST route handlers.

pub mod admin;
pub mod auth;
pub mod onboarding;

use onvest_core::error::OnvestError;
use uuid::Uuid;

use crate::error::ApiError;

/// Parse a UUID out of a path segment or body field.
pub(crate) fn parse_uuid(what: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError(OnvestError::Validation {
            message: format!("invalid {what}: {raw}"),
        })
    })
}
