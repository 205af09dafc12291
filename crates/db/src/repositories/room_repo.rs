//! Repository for the `rooms` table and, through [`PlacementRepo`], the
//! placements each room owns.
//!
//! Every write that touches both tables runs in one transaction opened
//! here, so a room is never visible with a half-replaced placement set.

use ehome_core::filters::{Metadata, PageQuery};
use ehome_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::placement::{NewPlacement, Placement};
use crate::models::room::{
    CreateRoom, Room, RoomSearch, RoomWithPlacements, RoomWithTotal, UpdateRoom,
};
use crate::repositories::PlacementRepo;
use crate::with_deadline;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, title, description, room_width, room_height, created_at";

/// Provides CRUD and filtered listing for rooms.
pub struct RoomRepo;

impl RoomRepo {
    /// Insert a room owned by `owner_id` together with its initial placements.
    ///
    /// Both the room row and every placement commit in one transaction.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRoom,
    ) -> Result<RoomWithPlacements, sqlx::Error> {
        with_deadline(async {
            let mut tx = pool.begin().await?;

            let insert_query = format!(
                "INSERT INTO rooms (owner_id, title, description, room_width, room_height)
                 VALUES ($1, $2, $3, $4, $5)
                 RETURNING {COLUMNS}"
            );
            let room = sqlx::query_as::<_, Room>(&insert_query)
                .bind(owner_id)
                .bind(&input.title)
                .bind(&input.description)
                .bind(input.width)
                .bind(input.height)
                .fetch_one(&mut *tx)
                .await?;

            let placements = attach(room.id, &input.furniture_list);
            PlacementRepo::create_batch_in(&mut tx, &placements).await?;

            tx.commit().await?;
            tracing::debug!(room_id = room.id, placements = placements.len(), "Room inserted");
            Ok::<_, sqlx::Error>(RoomWithPlacements {
                room,
                furniture_list: placements,
            })
        })
        .await
    }

    /// Find a room by id. Ids below 1 never match.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        if id < 1 {
            return Ok(None);
        }
        let query = format!("SELECT {COLUMNS} FROM rooms WHERE id = $1");
        with_deadline(sqlx::query_as::<_, Room>(&query).bind(id).fetch_optional(pool)).await
    }

    /// Find a room by id, enriched with its placements.
    pub async fn find_by_id_with_placements(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RoomWithPlacements>, sqlx::Error> {
        let room = Self::find_by_id(pool, id).await?;
        match room {
            Some(room) => {
                let furniture_list = PlacementRepo::list_for_room(pool, room.id).await?;
                Ok(Some(RoomWithPlacements {
                    room,
                    furniture_list,
                }))
            }
            None => Ok(None),
        }
    }

    /// Update a room. Only non-`None` scalar fields are applied.
    ///
    /// If `furniture_list` is `Some`, the room's placements are replaced by
    /// exactly that list in the same transaction as the scalar update.
    /// Callers validate the list and its catalog references beforehand.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoom,
    ) -> Result<Option<RoomWithPlacements>, sqlx::Error> {
        if id < 1 {
            return Ok(None);
        }
        with_deadline(async {
            let mut tx = pool.begin().await?;

            let update_query = format!(
                "UPDATE rooms SET
                    title = COALESCE($2, title),
                    description = COALESCE($3, description),
                    room_width = COALESCE($4, room_width),
                    room_height = COALESCE($5, room_height)
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            let room = sqlx::query_as::<_, Room>(&update_query)
                .bind(id)
                .bind(&input.title)
                .bind(&input.description)
                .bind(input.width)
                .bind(input.height)
                .fetch_optional(&mut *tx)
                .await?;

            let Some(room) = room else {
                // Nothing was written; dropping the transaction rolls it back.
                return Ok(None);
            };

            let furniture_list = match &input.furniture_list {
                Some(list) => {
                    let placements = attach(room.id, list);
                    Self::replace_placements_in(&mut tx, room.id, &placements).await?;
                    placements
                }
                None => PlacementRepo::list_for_room_in(&mut tx, room.id).await?,
            };

            tx.commit().await?;
            Ok::<_, sqlx::Error>(Some(RoomWithPlacements {
                room,
                furniture_list,
            }))
        })
        .await
    }

    /// Delete a room and all of its placements. Returns `true` if the room
    /// row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        if id < 1 {
            return Ok(false);
        }
        with_deadline(async {
            let mut tx = pool.begin().await?;
            let removed = PlacementRepo::delete_for_room_in(&mut tx, id).await?;

            let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Ok(false);
            }

            tx.commit().await?;
            tracing::debug!(room_id = id, placements_removed = removed, "Room deleted");
            Ok::<_, sqlx::Error>(true)
        })
        .await
    }

    /// Filtered, sorted, paginated listing.
    ///
    /// One query returns both the page of rows and the total number of
    /// matching rows (`count(*) OVER()`), from which the metadata is built.
    /// An empty `title` matches every room; a zero ceiling is unbounded.
    pub async fn list_filtered(
        pool: &PgPool,
        search: &RoomSearch,
        page: &PageQuery,
    ) -> Result<(Vec<Room>, Metadata), sqlx::Error> {
        // sort_column comes from the listing safelist and direction is a
        // two-valued enum, so neither can carry caller text into the SQL.
        let query = format!(
            "SELECT count(*) OVER() AS total_records, {COLUMNS}
             FROM rooms
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '')
               AND (room_width <= $2 OR $2 = 0)
               AND (room_height <= $3 OR $3 = 0)
             ORDER BY {column} {direction}, id ASC
             LIMIT $4 OFFSET $5",
            column = page.sort_column,
            direction = page.direction.as_sql(),
        );

        let rows = with_deadline(
            sqlx::query_as::<_, RoomWithTotal>(&query)
                .bind(&search.title)
                .bind(search.max_width)
                .bind(search.max_height)
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(pool),
        )
        .await?;

        let total_records = rows.first().map_or(0, |r| r.total_records);
        let rooms = rows.into_iter().map(|r| r.room).collect();
        Ok((rooms, page.metadata(total_records)))
    }

    /// [`list_filtered`](Self::list_filtered) with each room's placements
    /// fetched afterwards, one query per room on the page.
    pub async fn list_filtered_with_placements(
        pool: &PgPool,
        search: &RoomSearch,
        page: &PageQuery,
    ) -> Result<(Vec<RoomWithPlacements>, Metadata), sqlx::Error> {
        let (rooms, metadata) = Self::list_filtered(pool, search, page).await?;
        let mut result = Vec::with_capacity(rooms.len());

        for room in rooms {
            let furniture_list = PlacementRepo::list_for_room(pool, room.id).await?;
            result.push(RoomWithPlacements {
                room,
                furniture_list,
            });
        }

        Ok((result, metadata))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Replace a room's placement set within an existing transaction.
    async fn replace_placements_in(
        tx: &mut Transaction<'_, Postgres>,
        room_id: DbId,
        placements: &[Placement],
    ) -> Result<(), sqlx::Error> {
        let removed = PlacementRepo::delete_for_room_in(tx, room_id).await?;
        PlacementRepo::create_batch_in(tx, placements).await?;
        tracing::debug!(
            room_id,
            removed,
            inserted = placements.len(),
            "Room placements replaced"
        );
        Ok(())
    }
}

/// Bind submitted placements to `room_id`, ordered like reads return them.
fn attach(room_id: DbId, list: &[NewPlacement]) -> Vec<Placement> {
    let mut placements: Vec<Placement> = list.iter().map(|p| p.in_room(room_id)).collect();
    placements.sort_by_key(|p| p.furniture_id);
    placements
}
