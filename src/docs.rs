use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use classroll_auth::Role;
use classroll_core::errors::{ErrorKind, ErrorResponse};
use classroll_core::PaginationMeta;

use crate::modules::auth::model::{LoginRequest, LoginResponse};
use crate::modules::enrollments::model::{
    EnrolledStudent, Enrollment, EnrollmentDetail, EnrollmentDto, EnrollmentListItem,
    SectionRoster, SectionSummary, SectionSummaryWithCount, StudentSummary,
};
use crate::modules::sections::model::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionDetail, SectionWithCount,
    UpdateSectionDto,
};
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, StudentResponse, UpdateStudentDto,
    UserInfoResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::get_user_info,
        crate::modules::sections::controller::create_section,
        crate::modules::sections::controller::list_sections,
        crate::modules::sections::controller::get_section,
        crate::modules::sections::controller::update_section,
        crate::modules::sections::controller::delete_section,
        crate::modules::enrollments::controller::create_enrollment,
        crate::modules::enrollments::controller::list_enrollments,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::list_enrollments_by_section,
        crate::modules::enrollments::controller::update_enrollment,
        crate::modules::enrollments::controller::delete_enrollment,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorKind,
            Role,
            PaginationMeta,
            LoginRequest,
            LoginResponse,
            CreateStudentDto,
            UpdateStudentDto,
            StudentResponse,
            PaginatedStudentsResponse,
            UserInfoResponse,
            CreateSectionDto,
            UpdateSectionDto,
            Section,
            SectionWithCount,
            SectionDetail,
            PaginatedSectionsResponse,
            EnrollmentDto,
            Enrollment,
            EnrollmentDetail,
            EnrollmentListItem,
            EnrolledStudent,
            SectionRoster,
            StudentSummary,
            SectionSummary,
            SectionSummaryWithCount,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and token issuance"),
        (name = "Students", description = "Student registry"),
        (name = "Sections", description = "Class sections"),
        (name = "Enrollments", description = "Student enrollments in sections (administrators only)")
    ),
    info(
        title = "Classroll API",
        version = "0.1.0",
        description = "Student, section and enrollment management with role-gated JWT access.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
