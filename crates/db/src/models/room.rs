//! Room entity model and DTOs.
//!
//! A room is a bounded rectangle owned by one user. Its furniture layout is
//! a set of [`Placement`] rows in `room_furniture`, replaced wholesale on
//! update.

use ehome_core::types::{DbId, Timestamp};
use ehome_core::validation::RoomFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::placement::{NewPlacement, Placement};

/// A row from the `rooms` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Room {
    pub id: DbId,
    /// External identity of the creating user; fixed at creation.
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[sqlx(rename = "room_width")]
    pub width: i64,
    #[sqlx(rename = "room_height")]
    pub height: i64,
    pub created_at: Timestamp,
}

impl Room {
    pub fn fields(&self) -> RoomFields<'_> {
        RoomFields {
            title: &self.title,
            description: self.description.as_deref(),
            width: self.width,
            height: self.height,
        }
    }
}

/// A listing row: the room plus the window-function total of matching rows.
#[derive(Debug, Clone, FromRow)]
pub struct RoomWithTotal {
    #[sqlx(flatten)]
    pub room: Room,
    pub total_records: i64,
}

/// A room enriched with its placements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomWithPlacements {
    #[serde(flatten)]
    pub room: Room,
    pub furniture_list: Vec<Placement>,
}

/// DTO for creating a room. The owner comes from the authenticated caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateRoom {
    pub title: String,
    pub description: Option<String>,
    pub width: i64,
    pub height: i64,
    pub furniture_list: Vec<NewPlacement>,
}

impl CreateRoom {
    pub fn fields(&self) -> RoomFields<'_> {
        RoomFields {
            title: &self.title,
            description: self.description.as_deref(),
            width: self.width,
            height: self.height,
        }
    }
}

/// DTO for patching a room. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoom {
    pub title: Option<String>,
    pub description: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    /// If `Some` (even empty), replaces every placement. If `None`, leaves
    /// the placements untouched.
    pub furniture_list: Option<Vec<NewPlacement>>,
}

impl UpdateRoom {
    /// The scalar fields `current` would have once this patch is applied.
    pub fn merged(&self, current: &Room) -> Room {
        Room {
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            description: self
                .description
                .clone()
                .or_else(|| current.description.clone()),
            width: self.width.unwrap_or(current.width),
            height: self.height.unwrap_or(current.height),
            ..current.clone()
        }
    }
}

/// Search criteria for the filtered room listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomSearch {
    /// Full-text match against the title; empty matches everything.
    pub title: String,
    /// Width ceiling; 0 means unbounded.
    pub max_width: i64,
    /// Height ceiling; 0 means unbounded.
    pub max_height: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            id: 7,
            owner_id: 3,
            title: "Study".to_string(),
            description: Some("North facing".to_string()),
            width: 300,
            height: 250,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn merge_only_touches_supplied_fields() {
        let current = room();
        let patch = UpdateRoom {
            title: Some("Office".to_string()),
            ..Default::default()
        };
        let merged = patch.merged(&current);
        assert_eq!(merged.title, "Office");
        assert_eq!(merged.description, current.description);
        assert_eq!(merged.width, 300);
        assert_eq!(merged.height, 250);
        assert_eq!(merged.owner_id, current.owner_id);
        assert_eq!(merged.created_at, current.created_at);
    }

    #[test]
    fn absent_and_empty_placement_lists_differ() {
        let absent: UpdateRoom = serde_json::from_str(r#"{"title": "x"}"#).unwrap();
        assert!(absent.furniture_list.is_none());

        let empty: UpdateRoom = serde_json::from_str(r#"{"furniture_list": []}"#).unwrap();
        assert_eq!(empty.furniture_list, Some(vec![]));
    }

    #[test]
    fn create_missing_fields_decode_as_zero() {
        let input: CreateRoom = serde_json::from_str(r#"{"title": "Hall"}"#).unwrap();
        assert_eq!(input.width, 0);
        assert!(input.furniture_list.is_empty());
        assert!(!ehome_core::validation::validate_room(&input.fields()).is_valid());
    }
}
