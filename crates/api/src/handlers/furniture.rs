//! Handlers for the `/furniture` catalog resource.
//!
//! Reads are public; every mutation requires the `admin` role.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ehome_core::error::CoreError;
use ehome_core::types::DbId;
use ehome_core::validation::validate_furniture;
use ehome_db::models::furniture::{CreateFurniture, UpdateFurniture};
use ehome_db::repositories::FurnitureRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::{FurnitureResponse, MessageResponse};
use crate::state::AppState;

const ENTITY: &str = "Furniture";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/furniture
///
/// The whole catalog, ordered by id.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = FurnitureRepo::list(&state.pool).await?;
    Ok(Json(FurnitureResponse { furniture: items }))
}

/// GET /api/v1/furniture/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = FurnitureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(FurnitureResponse { furniture: item }))
}

/// POST /api/v1/furniture
///
/// Validate and insert a catalog item. Responds 201 with a `Location` header.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateFurniture>,
) -> AppResult<impl IntoResponse> {
    validate_furniture(&input.fields()).into_result()?;

    let item = FurnitureRepo::create(&state.pool, &input).await?;
    tracing::info!(furniture_id = item.id, admin_id = admin.user_id, "Furniture created");

    let location = format!("/api/v1/furniture/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(FurnitureResponse { furniture: item }),
    ))
}

/// PATCH /api/v1/furniture/{id}
///
/// Apply the supplied fields. The merged record is validated as a whole so a
/// patch cannot leave the item in an invalid state.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateFurniture>,
) -> AppResult<impl IntoResponse> {
    let current = FurnitureRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let merged = input.merged(&current);
    validate_furniture(&merged.fields()).into_result()?;

    let item = FurnitureRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(furniture_id = id, admin_id = admin.user_id, "Furniture updated");

    Ok(Json(FurnitureResponse { furniture: item }))
}

/// DELETE /api/v1/furniture/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !FurnitureRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(furniture_id = id, admin_id = admin.user_id, "Furniture deleted");
    Ok(Json(MessageResponse::new("furniture successfully deleted")))
}
