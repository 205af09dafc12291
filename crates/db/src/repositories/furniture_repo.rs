//! Repository for the `furniture` catalog table.

use std::collections::HashSet;

use ehome_core::types::DbId;
use sqlx::PgPool;

use crate::models::furniture::{CreateFurniture, Furniture, UpdateFurniture};
use crate::with_deadline;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price, description, width, height, image, shape";

/// Provides CRUD operations for catalog furniture.
pub struct FurnitureRepo;

impl FurnitureRepo {
    /// Insert a new catalog item, returning the stored row with its id.
    pub async fn create(pool: &PgPool, input: &CreateFurniture) -> Result<Furniture, sqlx::Error> {
        let query = format!(
            "INSERT INTO furniture (name, price, description, width, height, image, shape)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        with_deadline(
            sqlx::query_as::<_, Furniture>(&query)
                .bind(&input.name)
                .bind(input.price)
                .bind(&input.description)
                .bind(input.width)
                .bind(input.height)
                .bind(&input.image)
                .bind(i16::from(input.shape))
                .fetch_one(pool),
        )
        .await
    }

    /// Find a catalog item by id. Ids below 1 never match.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Furniture>, sqlx::Error> {
        if id < 1 {
            return Ok(None);
        }
        let query = format!("SELECT {COLUMNS} FROM furniture WHERE id = $1");
        with_deadline(
            sqlx::query_as::<_, Furniture>(&query)
                .bind(id)
                .fetch_optional(pool),
        )
        .await
    }

    /// List the whole catalog ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Furniture>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM furniture ORDER BY id");
        with_deadline(sqlx::query_as::<_, Furniture>(&query).fetch_all(pool)).await
    }

    /// Every catalog id, for validating placement references in one round trip.
    pub async fn list_ids(pool: &PgPool) -> Result<HashSet<DbId>, sqlx::Error> {
        let ids: Vec<DbId> = with_deadline(
            sqlx::query_scalar::<_, DbId>("SELECT id FROM furniture").fetch_all(pool),
        )
        .await?;
        Ok(ids.into_iter().collect())
    }

    /// Update a catalog item. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFurniture,
    ) -> Result<Option<Furniture>, sqlx::Error> {
        if id < 1 {
            return Ok(None);
        }
        let query = format!(
            "UPDATE furniture SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                description = COALESCE($4, description),
                width = COALESCE($5, width),
                height = COALESCE($6, height),
                image = COALESCE($7, image),
                shape = COALESCE($8, shape)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        with_deadline(
            sqlx::query_as::<_, Furniture>(&query)
                .bind(id)
                .bind(&input.name)
                .bind(input.price)
                .bind(&input.description)
                .bind(input.width)
                .bind(input.height)
                .bind(&input.image)
                .bind(input.shape.map(i16::from))
                .fetch_optional(pool),
        )
        .await
    }

    /// Delete a catalog item. Returns `true` if a row was removed.
    ///
    /// Placements that reference the item are left in place; the room write
    /// path re-checks references against the live catalog.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        if id < 1 {
            return Ok(false);
        }
        let result = with_deadline(
            sqlx::query("DELETE FROM furniture WHERE id = $1")
                .bind(id)
                .execute(pool),
        )
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
