//! Route definitions for the furniture catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::furniture;
use crate::state::AppState;

/// Routes mounted at `/furniture`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(furniture::list).post(furniture::create))
        .route(
            "/{id}",
            get(furniture::get_by_id)
                .patch(furniture::update)
                .delete(furniture::delete),
        )
}
