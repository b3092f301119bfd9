use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use classroll_core::AppError;
use classroll_core::errors::ErrorResponse;
use classroll_observability::track_section_created;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireAdministrator;
use crate::modules::sections::model::{
    CreateSectionDto, PaginatedSectionsResponse, Section, SectionDetail, SectionListParams,
    UpdateSectionDto,
};
use crate::modules::sections::service::SectionService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/turmas",
    request_body = CreateSectionDto,
    responses(
        (status = 201, description = "Section created", body = Section,
            headers(("Location" = String, description = "URL of the new section"))),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Sections"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn create_section(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    ValidatedJson(dto): ValidatedJson<CreateSectionDto>,
) -> Result<impl IntoResponse, AppError> {
    let section = SectionService::create_section(&state.db, dto).await?;
    track_section_created();

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/turmas/{}", section.id))],
        Json(section),
    ))
}

#[utoipa::path(
    get,
    path = "/api/turmas",
    params(
        SectionListParams
    ),
    responses(
        (status = 200, description = "Page of sections with enrollment counts", body = PaginatedSectionsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Sections"
)]
#[instrument(skip(state, _auth_user))]
pub async fn list_sections(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(params): Query<SectionListParams>,
) -> Result<Json<PaginatedSectionsResponse>, AppError> {
    let page = params.page_request();
    let (items, total) = SectionService::list_sections(&state.db, page).await?;

    Ok(Json(PaginatedSectionsResponse {
        items,
        meta: page.meta(total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/turmas/{id}",
    params(
        ("id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 200, description = "Section with its enrolled students", body = SectionDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Sections"
)]
#[instrument(skip(state, _auth_user))]
pub async fn get_section(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<SectionDetail>, AppError> {
    let section = SectionService::get_section(&state.db, id).await?;
    Ok(Json(section))
}

#[utoipa::path(
    put,
    path = "/api/turmas/{id}",
    params(
        ("id" = i32, Path, description = "Section ID")
    ),
    request_body = UpdateSectionDto,
    responses(
        (status = 200, description = "Section updated", body = Section),
        (status = 400, description = "Bad request - validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Sections"
)]
#[instrument(skip(state, _admin, dto))]
pub async fn update_section(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<UpdateSectionDto>,
) -> Result<Json<Section>, AppError> {
    let section = SectionService::update_section(&state.db, id, dto).await?;
    Ok(Json(section))
}

/// Delete a section together with its enrollments
#[utoipa::path(
    delete,
    path = "/api/turmas/{id}",
    params(
        ("id" = i32, Path, description = "Section ID")
    ),
    responses(
        (status = 204, description = "Section deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - Administrator only", body = ErrorResponse),
        (status = 404, description = "Section not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Sections"
)]
#[instrument(skip(state, _admin))]
pub async fn delete_section(
    State(state): State<AppState>,
    RequireAdministrator(_admin): RequireAdministrator,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    SectionService::delete_section(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
