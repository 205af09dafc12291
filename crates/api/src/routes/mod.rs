pub mod furniture;
pub mod health;
pub mod room;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /furniture                 list (public), create (admin)
/// /furniture/{id}            get (public), update, delete (admin)
///
/// /rooms                     list, create (authenticated)
/// /rooms/{id}                get (authenticated), update, delete (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/furniture", furniture::router())
        .nest("/rooms", room::router())
}
