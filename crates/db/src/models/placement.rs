//! Placement model: one catalog item positioned inside one room.
//!
//! Rows live in `room_furniture`, keyed by `(room_id, furniture_id)`.

use ehome_core::types::DbId;
use ehome_core::validation::PlacementFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `room_furniture` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize)]
pub struct Placement {
    pub furniture_id: DbId,
    pub room_id: DbId,
    pub x: i64,
    pub y: i64,
}

/// A placement as submitted in a room payload; the room comes from context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NewPlacement {
    pub furniture_id: DbId,
    pub x: i64,
    pub y: i64,
}

impl NewPlacement {
    pub fn fields(&self) -> PlacementFields {
        PlacementFields {
            furniture_id: self.furniture_id,
            x: self.x,
            y: self.y,
        }
    }

    pub fn in_room(self, room_id: DbId) -> Placement {
        Placement {
            furniture_id: self.furniture_id,
            room_id,
            x: self.x,
            y: self.y,
        }
    }
}

/// Structural views of a submitted list, ready for the validation layer.
pub fn placement_fields(placements: &[NewPlacement]) -> Vec<PlacementFields> {
    placements.iter().map(NewPlacement::fields).collect()
}
