use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use classroll_core::AppError;
use classroll_core::errors::ErrorResponse;
use classroll_observability::track_student_created;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdministrator;
use crate::modules::students::model::{
    CreateStudentDto, PaginatedStudentsResponse, StudentListParams, StudentResponse,
    UpdateStudentDto, UserInfoResponse,
};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a student (administrators only)
#[utoipa::path(
    post,
    path = "/api/alunos",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created", body = StudentResponse,
            headers(("Location" = String, description = "URL of the new student"))),
        (status = 400, description = "Invalid field, weak password or invalid national ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 409, description = "National ID or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_student(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<impl IntoResponse, AppError> {
    let student = StudentService::create_student(&state.db, dto).await?;
    track_student_created(if student.is_admin { "Administrator" } else { "Student" });

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/alunos/{}", student.id))],
        Json(student),
    ))
}

#[utoipa::path(
    get,
    path = "/api/alunos",
    params(
        StudentListParams
    ),
    responses(
        (status = 200, description = "Page of students", body = PaginatedStudentsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<StudentListParams>,
) -> Result<Json<PaginatedStudentsResponse>, AppError> {
    let page = params.page_request();
    let (items, total) =
        StudentService::list_students(&state.db, params.search_term(), page).await?;

    Ok(Json(PaginatedStudentsResponse {
        items,
        meta: page.meta(total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/alunos/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_student(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = StudentService::get_student(&state.db, id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/alunos/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Invalid field, weak password or invalid national ID", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only, or demoting the bootstrap administrator", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "National ID or email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/alunos/{id}",
    params(
        ("id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only or bootstrap administrator", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Student still has enrollments", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_student(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    StudentService::delete_student(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Identity of the caller, read from the token alone
#[utoipa::path(
    get,
    path = "/api/alunos/GetUserInfo",
    responses(
        (status = 200, description = "Caller identity", body = UserInfoResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Students"
)]
#[instrument(skip(auth_user))]
pub async fn get_user_info(auth_user: AuthUser) -> Result<Json<UserInfoResponse>, AppError> {
    Ok(Json(UserInfoResponse {
        user_id: auth_user.student_id()?,
        role: auth_user.role(),
        email: auth_user.email().to_string(),
    }))
}
