use crate::modules::sections::controller::{
    create_section, delete_section, get_section, list_sections, update_section,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn init_sections_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_section).get(list_sections))
        .route(
            "/{id}",
            get(get_section).put(update_section).delete(delete_section),
        )
}
