use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use classroll_core::AppError;
use classroll_core::errors::ErrorResponse;
use classroll_observability::track_enrollment_created;
use tracing::instrument;

use crate::modules::enrollments::model::{
    Enrollment, EnrollmentDetail, EnrollmentDto, EnrollmentListItem, SectionRoster,
};
use crate::modules::enrollments::service::EnrollmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/matriculas",
    request_body = EnrollmentDto,
    responses(
        (status = 201, description = "Enrollment created", body = Enrollment,
            headers(("Location" = String, description = "URL of the new enrollment"))),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Student or section not found", body = ErrorResponse),
        (status = 409, description = "Student already enrolled in the section", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<EnrollmentDto>,
) -> Result<impl IntoResponse, AppError> {
    let enrollment = EnrollmentService::create_enrollment(&state.db, dto).await?;
    track_enrollment_created();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/matriculas/{}", enrollment.id))],
        Json(enrollment),
    ))
}

#[utoipa::path(
    get,
    path = "/api/matriculas",
    responses(
        (status = 200, description = "All enrollments ordered by id", body = Vec<EnrollmentListItem>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn list_enrollments(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentListItem>>, AppError> {
    let enrollments = EnrollmentService::list_enrollments(&state.db).await?;
    Ok(Json(enrollments))
}

#[utoipa::path(
    get,
    path = "/api/matriculas/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 200, description = "Enrollment with student and section", body = EnrollmentDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EnrollmentDetail>, AppError> {
    let enrollment = EnrollmentService::get_enrollment(&state.db, id).await?;
    Ok(Json(enrollment))
}

/// Students enrolled in a section, ordered by name
#[utoipa::path(
    get,
    path = "/api/matriculas/turma/{section_id}",
    params(
        ("section_id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section roster", body = SectionRoster),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn list_enrollments_by_section(
    State(state): State<AppState>,
    Path(section_id): Path<i32>,
) -> Result<Json<SectionRoster>, AppError> {
    let roster = EnrollmentService::list_by_section(&state.db, section_id).await?;
    Ok(Json(roster))
}

#[utoipa::path(
    put,
    path = "/api/matriculas/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    request_body = EnrollmentDto,
    responses(
        (status = 200, description = "Enrollment updated", body = Enrollment),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Enrollment, student or section not found", body = ErrorResponse),
        (status = 409, description = "Student already enrolled in the section", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<EnrollmentDto>,
) -> Result<Json<Enrollment>, AppError> {
    let enrollment = EnrollmentService::update_enrollment(&state.db, id, dto).await?;
    Ok(Json(enrollment))
}

#[utoipa::path(
    delete,
    path = "/api/matriculas/{id}",
    params(
        ("id" = i32, Path, description = "Enrollment ID")
    ),
    responses(
        (status = 204, description = "Enrollment deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Enrollment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Enrollments"
)]
#[instrument(skip(state))]
pub async fn delete_enrollment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    EnrollmentService::delete_enrollment(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
