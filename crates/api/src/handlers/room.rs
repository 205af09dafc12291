//! Handlers for the `/rooms` resource.
//!
//! Every route requires an authenticated caller; updates and deletes are
//! further restricted to the room's owner. Writes are checked in full
//! (scalar fields, placement structure, then catalog references) before
//! any statement runs, then handed to [`RoomRepo`] which applies them in one
//! transaction.

use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ehome_core::error::CoreError;
use ehome_core::types::DbId;
use ehome_core::validation::{
    check_references, validate_placements, validate_room, PlacementFields,
};
use ehome_db::models::placement::placement_fields;
use ehome_db::models::room::{CreateRoom, Room, UpdateRoom};
use ehome_db::repositories::{FurnitureRepo, RoomRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::ListRoomsParams;
use crate::response::{MessageResponse, RoomListResponse, RoomResponse};
use crate::state::AppState;

const ENTITY: &str = "Room";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/rooms?title=&width=&height=&page=&page_size=&sort=
///
/// Filtered, sorted, paginated listing. Each room carries its placements.
pub async fn list(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListRoomsParams>,
) -> AppResult<impl IntoResponse> {
    let (search, page) = params.resolve()?;
    let (rooms, metadata) =
        RoomRepo::list_filtered_with_placements(&state.pool, &search, &page).await?;
    Ok(Json(RoomListResponse { rooms, metadata }))
}

/// GET /api/v1/rooms/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let room = RoomRepo::find_by_id_with_placements(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(RoomResponse { room }))
}

/// POST /api/v1/rooms
///
/// Create a room owned by the caller, with its initial placements.
/// Responds 201 with a `Location` header.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<impl IntoResponse> {
    let fields = placement_fields(&input.furniture_list);
    let mut errors = validate_room(&input.fields());
    errors.merge(validate_placements(&fields));
    errors.into_result()?;
    ensure_references(&state, &fields).await?;

    let room = RoomRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(
        room_id = room.room.id,
        owner_id = user.user_id,
        placements = room.furniture_list.len(),
        "Room created"
    );

    let location = format!("/api/v1/rooms/{}", room.room.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(RoomResponse { room }),
    ))
}

/// PATCH /api/v1/rooms/{id}
///
/// Merge the supplied scalar fields. A supplied `furniture_list`, even an
/// empty one, replaces every placement of the room; an absent one leaves
/// them as they are.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRoom>,
) -> AppResult<impl IntoResponse> {
    let current = find_owned(&state, &user, id).await?;

    let fields = input.furniture_list.as_deref().map(placement_fields);
    let mut errors = validate_room(&input.merged(&current).fields());
    if let Some(fields) = &fields {
        errors.merge(validate_placements(fields));
    }
    errors.into_result()?;
    if let Some(fields) = &fields {
        ensure_references(&state, fields).await?;
    }

    // The room may have been deleted since the ownership check.
    let room = RoomRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(
        room_id = id,
        owner_id = user.user_id,
        placements_replaced = input.furniture_list.is_some(),
        "Room updated"
    );

    Ok(Json(RoomResponse { room }))
}

/// DELETE /api/v1/rooms/{id}
///
/// Remove the room and all of its placements.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned(&state, &user, id).await?;

    if !RoomRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(room_id = id, owner_id = user.user_id, "Room deleted");

    Ok(Json(MessageResponse::new("room successfully deleted")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a room and make sure `user` owns it.
async fn find_owned(state: &AppState, user: &AuthUser, id: DbId) -> AppResult<Room> {
    let room = RoomRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if room.owner_id != user.user_id {
        tracing::warn!(room_id = id, caller_id = user.user_id, "Rejected non-owner mutation");
        return Err(AppError::Core(CoreError::ForeignOwner { entity: ENTITY, id }));
    }
    Ok(room)
}

/// Check every referenced furniture id against the live catalog.
///
/// Runs only after all field errors have been reported; an empty list never
/// reads the catalog.
async fn ensure_references(state: &AppState, fields: &[PlacementFields]) -> AppResult<()> {
    if fields.is_empty() {
        return Ok(());
    }
    let catalog_ids = FurnitureRepo::list_ids(&state.pool).await?;
    check_references(fields, &catalog_ids)?;
    Ok(())
}
