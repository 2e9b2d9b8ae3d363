//! Request extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use common_utils::consts;
use domain_types::user::UserRecord;

use crate::{
    error::{internal_error, unauthorized, HttpError},
    http::state::AppState,
};

/// The authenticated user for this request. The identity comes from the
/// `x-user-email` header when present, else the configured demo user; anyone
/// not in the user store is rejected.
pub struct CurrentUser(pub UserRecord);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(consts::X_USER_EMAIL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| state.config.user.email.clone());

        let user = state
            .users
            .find_by_email(&email)
            .await
            .map_err(|report| {
                HttpError::from(report.change_context(internal_error(
                    "failed to read the user store",
                )))
            })?
            .ok_or_else(|| HttpError::from(unauthorized(format!("unknown user {email}"))))?;

        Ok(Self(user))
    }
}
