//! JWT claim structures for access tokens.

use std::fmt;
use std::str::FromStr;

use classroll_core::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Closed set of roles a token can carry.
///
/// Serialized as `"Administrator"` / `"Student"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Administrator,
    Student,
}

impl Role {
    /// Role granted to a student record, derived from its administrator flag.
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            Self::Administrator
        } else {
            Self::Student
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Student => "Student",
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Self::Administrator),
            "Student" => Ok(Self::Student),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// JWT claims for access tokens.
///
/// These claims carry everything the API needs to authorize a request
/// without touching the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Student ID (subject claim)
    pub sub: String,
    /// Student's email address
    pub email: String,
    pub role: Role,
    pub iss: String,
    pub aud: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    pub fn student_id(&self) -> Result<i32, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid student ID in token"))
    }
}
