use crate::modules::enrollments::controller::{
    create_enrollment, delete_enrollment, get_enrollment, list_enrollments,
    list_enrollments_by_section, update_enrollment,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Every route here is administrator-only; the gate is applied as a
/// `route_layer` where this router is nested.
pub fn init_enrollments_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_enrollment).get(list_enrollments))
        .route("/turma/{section_id}", get(list_enrollments_by_section))
        .route(
            "/{id}",
            get(get_enrollment)
                .put(update_enrollment)
                .delete(delete_enrollment),
        )
}
