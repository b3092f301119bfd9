use classroll_auth::{Role, create_access_token};
use classroll_config::JwtConfig;
use classroll_core::AppError;
use classroll_core::password::{verify_password, verify_password_dummy};
use classroll_observability::{track_jwt_issued, track_login_failure, track_login_success};
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument, warn};

use super::model::{LoginRequest, LoginResponse};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, FromRow)]
struct CredentialRow {
    id: i32,
    email: String,
    password_hash: String,
    is_admin: bool,
}

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and issues an access token.
    ///
    /// Unknown email and wrong password produce the same error and cost one
    /// bcrypt verification each.
    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let email = normalize_email(&dto.email);

        let row = sqlx::query_as::<_, CredentialRow>(
            "SELECT id, email, password_hash, is_admin FROM students WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        let Some(row) = row else {
            verify_password_dummy(&dto.password);
            track_login_failure("unknown_email");
            warn!("Login attempt for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &row.password_hash) {
            track_login_failure("wrong_password");
            warn!(student_id = row.id, "Login attempt with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let role = Role::from_admin_flag(row.is_admin);
        let token = create_access_token(row.id, &row.email, role, jwt_config)?;

        track_login_success(role.as_str());
        track_jwt_issued();
        info!(student_id = row.id, role = %role, "Student logged in");

        Ok(LoginResponse::bearer(token, jwt_config.access_token_expiry))
    }
}

/// Emails are compared and stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
