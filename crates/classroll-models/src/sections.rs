//! Class section models and DTOs.

use classroll_core::serde::deserialize_optional_i64;
use classroll_core::{PageRequest, PaginationMeta};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::enrollments::EnrolledStudent;
use crate::validation::validate_display_name;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Section {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// A section annotated with how many students are enrolled in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SectionWithCount {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub enrollment_count: i64,
}

/// A section with its enrolled students, ordered by name then id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub enrollment_count: i64,
    pub students: Vec<EnrolledStudent>,
}

impl SectionDetail {
    pub fn new(section: Section, students: Vec<EnrolledStudent>) -> Self {
        Self {
            id: section.id,
            name: section.name,
            description: section.description,
            enrollment_count: students.len() as i64,
            students,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSectionDto {
    #[validate(custom(function = "validate_display_name"))]
    #[schema(example = "Turma A")]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSectionDto {
    #[validate(custom(function = "validate_display_name"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SectionListParams {
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

impl SectionListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedSectionsResponse {
    pub items: Vec<SectionWithCount>,
    pub meta: PaginationMeta,
}
