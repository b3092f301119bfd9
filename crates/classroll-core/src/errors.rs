//! Application error type with a stable kind-to-status mapping.
//!
//! Every failure that reaches the HTTP boundary is an [`AppError`]. The
//! [`ErrorKind`] decides the status code; the wrapped [`anyhow::Error`] carries
//! the message shown to the caller (or, for internal errors, the cause that is
//! logged and withheld). Field-level validation failures additionally carry a
//! [`FieldErrors`] map.
//!
//! # Response body
//!
//! ```json
//! {
//!   "error": "Validation failed",
//!   "kind": "invalid_argument",
//!   "errors": { "name": ["name must have at least 3 characters"] }
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use sqlx::error::ErrorKind as DbErrorKind;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Field name → list of messages.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Closed set of failure kinds surfaced to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or missing field.
    InvalidArgument,
    /// Password does not meet the strength rules.
    WeakPassword,
    /// National ID failed its check digits.
    InvalidChecksum,
    /// A unique attribute (national ID, email) is already taken.
    Conflict,
    /// The (student, section) pair is already enrolled.
    Duplicate,
    NotFound,
    /// Missing, invalid or expired token.
    Unauthorized,
    /// Valid token with the wrong role, or a protected record.
    Forbidden,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::InvalidArgument | Self::WeakPassword | Self::InvalidChecksum => {
                StatusCode::BAD_REQUEST
            }
            Self::Conflict | Self::Duplicate => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            fields: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn invalid_argument<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidArgument, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn duplicate<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Duplicate, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message.into()))
    }

    pub fn weak_password() -> Self {
        Self::new(
            ErrorKind::WeakPassword,
            anyhow::anyhow!(
                "Weak password. It must have at least 8 characters, with uppercase, lowercase, digit and symbol."
            ),
        )
        .with_field("password", "password is too weak")
    }

    pub fn invalid_checksum() -> Self {
        Self::new(
            ErrorKind::InvalidChecksum,
            anyhow::anyhow!("Invalid national ID"),
        )
        .with_field("national_id", "national_id check digits do not match")
    }

    /// Builds an `InvalidArgument` error from `validator` output.
    pub fn validation(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let messages = fields.entry(field.to_string()).or_default();
            for err in errs {
                messages.push(
                    err.message
                        .as_ref()
                        .map(|msg| msg.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field)),
                );
            }
        }

        Self {
            kind: ErrorKind::InvalidArgument,
            error: anyhow::anyhow!("Validation failed"),
            fields: Some(fields),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.fields
            .get_or_insert_with(FieldErrors::new)
            .entry(field.into())
            .or_default()
            .push(message.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Internal server error");
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            kind: self.kind,
            errors: self.fields,
        });

        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Constraint violation reported by the store, with the constraint name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreViolation<'a> {
    Unique(&'a str),
    ForeignKey(&'a str),
    Check(&'a str),
}

/// Classifies a `sqlx` error as a constraint violation, if it is one.
pub fn store_violation(err: &sqlx::Error) -> Option<StoreViolation<'_>> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    let constraint = db_err.constraint().unwrap_or_default();

    match db_err.kind() {
        DbErrorKind::UniqueViolation => Some(StoreViolation::Unique(constraint)),
        DbErrorKind::ForeignKeyViolation => Some(StoreViolation::ForeignKey(constraint)),
        DbErrorKind::CheckViolation => Some(StoreViolation::Check(constraint)),
        _ => None,
    }
}
