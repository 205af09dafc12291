//! Repository for the `room_furniture` placement join table.
//!
//! The `*_in` variants run inside a caller-owned transaction so the room
//! repository can make a multi-table write atomic.

use ehome_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::placement::Placement;
use crate::with_deadline;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "furniture_id, room_id, x, y";

/// Provides operations on the placements of furniture inside rooms.
pub struct PlacementRepo;

impl PlacementRepo {
    /// All placements of a room, ordered by furniture id.
    pub async fn list_for_room(pool: &PgPool, room_id: DbId) -> Result<Vec<Placement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM room_furniture WHERE room_id = $1 ORDER BY furniture_id"
        );
        with_deadline(
            sqlx::query_as::<_, Placement>(&query)
                .bind(room_id)
                .fetch_all(pool),
        )
        .await
    }

    /// Insert a single placement.
    pub async fn create(pool: &PgPool, placement: &Placement) -> Result<(), sqlx::Error> {
        with_deadline(async {
            sqlx::query(
                "INSERT INTO room_furniture (furniture_id, room_id, x, y) VALUES ($1, $2, $3, $4)",
            )
            .bind(placement.furniture_id)
            .bind(placement.room_id)
            .bind(placement.x)
            .bind(placement.y)
            .execute(pool)
            .await?;
            Ok::<_, sqlx::Error>(())
        })
        .await
    }

    /// Insert every placement or none of them.
    pub async fn create_batch(pool: &PgPool, placements: &[Placement]) -> Result<(), sqlx::Error> {
        with_deadline(async {
            let mut tx = pool.begin().await?;
            Self::create_batch_in(&mut tx, placements).await?;
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        })
        .await
    }

    /// Remove every placement of a room, returning how many rows went.
    ///
    /// Ids below 1 fail with `RowNotFound` without touching the table.
    pub async fn delete_for_room(pool: &PgPool, room_id: DbId) -> Result<u64, sqlx::Error> {
        if room_id < 1 {
            return Err(sqlx::Error::RowNotFound);
        }
        let result = with_deadline(
            sqlx::query("DELETE FROM room_furniture WHERE room_id = $1")
                .bind(room_id)
                .execute(pool),
        )
        .await?;
        Ok(result.rows_affected())
    }

    // -----------------------------------------------------------------------
    // Transaction-scoped helpers
    // -----------------------------------------------------------------------

    /// All placements of a room, read inside an existing transaction.
    pub async fn list_for_room_in(
        tx: &mut Transaction<'_, Postgres>,
        room_id: DbId,
    ) -> Result<Vec<Placement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM room_furniture WHERE room_id = $1 ORDER BY furniture_id"
        );
        sqlx::query_as::<_, Placement>(&query)
            .bind(room_id)
            .fetch_all(&mut **tx)
            .await
    }

    /// Insert placements within an existing transaction.
    ///
    /// The first failing row aborts; dropping the transaction rolls back the
    /// rows inserted before it.
    pub async fn create_batch_in(
        tx: &mut Transaction<'_, Postgres>,
        placements: &[Placement],
    ) -> Result<(), sqlx::Error> {
        for placement in placements {
            sqlx::query(
                "INSERT INTO room_furniture (furniture_id, room_id, x, y) VALUES ($1, $2, $3, $4)",
            )
            .bind(placement.furniture_id)
            .bind(placement.room_id)
            .bind(placement.x)
            .bind(placement.y)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Remove every placement of a room within an existing transaction.
    pub async fn delete_for_room_in(
        tx: &mut Transaction<'_, Postgres>,
        room_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        if room_id < 1 {
            return Err(sqlx::Error::RowNotFound);
        }
        let result = sqlx::query("DELETE FROM room_furniture WHERE room_id = $1")
            .bind(room_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
