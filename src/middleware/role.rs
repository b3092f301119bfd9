//! Role-based authorization.
//!
//! Three ways to gate a handler:
//! 1. [`require_administrator`] as a `route_layer` over a whole router
//! 2. The [`RequireAdministrator`] extractor on individual handlers
//! 3. [`check_role`] / [`check_any_role`] inside handler logic

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use classroll_auth::Role;
use classroll_core::AppError;
use classroll_observability::track_access_denied;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Authenticates the request and admits it only if its role is allowed.
///
/// The authenticated user is stored in the request extensions so that
/// downstream `AuthUser` extractors do not re-verify the token.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: &[Role],
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    check_any_role(&auth_user, allowed_roles)?;

    parts.extensions.insert(auth_user);
    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Layer for routers that only administrators may reach.
///
/// ```rust,ignore
/// use axum::{Router, middleware};
///
/// let routes = Router::new()
///     .route("/", get(list_enrollments))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_administrator));
/// ```
pub async fn require_administrator(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, &[Role::Administrator]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Extractor that rejects any caller whose token is not an administrator's.
#[derive(Debug, Clone)]
pub struct RequireAdministrator(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdministrator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_user = AuthUser::from_request_parts(parts, state).await?;
        check_role(&auth_user, Role::Administrator)?;
        Ok(RequireAdministrator(auth_user))
    }
}

pub fn check_role(auth_user: &AuthUser, required_role: Role) -> Result<(), AppError> {
    check_any_role(auth_user, &[required_role])
}

pub fn check_any_role(auth_user: &AuthUser, allowed_roles: &[Role]) -> Result<(), AppError> {
    let role = auth_user.role();

    if !allowed_roles.contains(&role) {
        track_access_denied("forbidden_role");
        return Err(AppError::forbidden(format!(
            "Access denied. Role {} is not allowed to perform this action",
            role
        )));
    }

    Ok(())
}
