//! # Classroll Models
//!
//! Domain models and DTOs for the Classroll API.
//!
//! This crate provides the request bodies, database row types and response
//! shapes used by the HTTP layer and the CLI:
//!
//! - [`auth`]: login request and token response
//! - [`students`]: student DTOs, read projection and list parameters
//! - [`sections`]: class section DTOs and responses with enrollment counts
//! - [`enrollments`]: enrollment DTOs, joined detail views and rosters
//! - [`national_id`]: the 11-digit national ID value type and its check digits
//!
//! # Example
//!
//! ```ignore
//! use classroll_models::national_id::NationalId;
//! use classroll_models::students::CreateStudentDto;
//!
//! let id: NationalId = "529.982.247-25".replace(['.', '-'], "").parse()?;
//! assert_eq!(id.as_str(), "52998224725");
//! ```

pub mod auth;
pub mod enrollments;
pub mod national_id;
pub mod sections;
pub mod students;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse};

pub use enrollments::{
    EnrolledStudent, Enrollment, EnrollmentDetail, EnrollmentDto, EnrollmentListItem,
    SectionRoster, SectionSummary, SectionSummaryWithCount, StudentSummary,
};

pub use national_id::{NationalId, NationalIdError};

pub use sections::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionDetail, SectionListParams,
    SectionWithCount, UpdateSectionDto,
};

pub use students::{
    BOOTSTRAP_ADMIN_ID, CreateStudentDto, PaginatedStudentsResponse, StudentListParams, StudentResponse,
    UpdateStudentDto, UserInfoResponse,
};
