//! Student domain models and DTOs.
//!
//! Students are both the people enrolled in sections and the API's
//! principals: the administrator flag on a student record decides the role
//! carried by that student's tokens.

use chrono::NaiveDate;
use classroll_auth::Role;
use classroll_core::serde::deserialize_optional_i64;
use classroll_core::{PageRequest, PaginationMeta};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::national_id::validate_national_id_format;
use crate::validation::{validate_display_name, validate_email_address};

/// Id reserved for the administrator provisioned by the CLI. It can never be
/// deleted and the identity sequence never hands it out.
pub const BOOTSTRAP_ADMIN_ID: i32 = 1;

/// Read projection of a student. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    pub name: String,
    pub birth_date: NaiveDate,
    #[schema(example = "52998224725")]
    pub national_id: String,
    pub email: String,
    pub is_admin: bool,
}

/// DTO for registering a new student.
///
/// Password strength and national ID check digits are verified by the
/// service after these format rules pass.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStudentDto {
    #[validate(custom(function = "validate_display_name"))]
    #[schema(example = "Ana Souza")]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(custom(function = "validate_national_id_format"))]
    #[schema(example = "52998224725")]
    pub national_id: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    #[schema(example = "S3cure!pass")]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// DTO for updating a student.
///
/// Identity fields are replaced as a whole. A missing or blank `password`
/// keeps the current hash and a missing `is_admin` keeps the current flag.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
    pub birth_date: NaiveDate,
    #[validate(custom(function = "validate_national_id_format"))]
    pub national_id: String,
    #[validate(custom(function = "validate_email_address"))]
    pub email: String,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl UpdateStudentDto {
    /// The new password, if one was actually supplied.
    pub fn new_password(&self) -> Option<&str> {
        self.password
            .as_deref()
            .filter(|password| !password.trim().is_empty())
    }
}

/// Query parameters for listing students.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentListParams {
    /// Case-insensitive substring matched against the student name
    #[serde(alias = "search")]
    pub busca: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(
        default,
        rename = "pageSize",
        alias = "page_size",
        deserialize_with = "deserialize_optional_i64"
    )]
    pub page_size: Option<i64>,
}

impl StudentListParams {
    /// Trimmed search term, or `None` when absent or blank.
    pub fn search_term(&self) -> Option<&str> {
        self.busca
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Paginated response containing students.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedStudentsResponse {
    pub items: Vec<StudentResponse>,
    pub meta: PaginationMeta,
}

/// Identity of the caller as carried by their token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    pub user_id: i32,
    pub role: Role,
    pub email: String,
}
