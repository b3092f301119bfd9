use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use classroll_auth::{Claims, Role, verify_token};
use classroll_core::AppError;
use classroll_observability::track_access_denied;

use crate::state::AppState;

/// Extractor that validates the bearer token and exposes its claims.
///
/// If a role layer already authenticated the request, the cached user is
/// reused instead of verifying the token twice.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn student_id(&self) -> Result<i32, AppError> {
        self.0.student_id()
    }

    pub fn role(&self) -> Role {
        self.0.role
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn is_administrator(&self) -> bool {
        self.0.role.is_administrator()
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                track_access_denied("missing_token");
                AppError::unauthorized("Missing authorization header")
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            track_access_denied("malformed_header");
            AppError::unauthorized("Invalid authorization header format")
        })?;

        let claims = verify_token(token.trim(), &state.jwt_config).inspect_err(|_| {
            track_access_denied("invalid_token");
        })?;

        Ok(AuthUser(claims))
    }
}
