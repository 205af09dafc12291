//! Named response envelopes.
//!
//! Every payload is wrapped under a key naming what it carries
//! (`{"room": ...}`, `{"rooms": [...], "metadata": ...}`). Use these types
//! instead of ad-hoc `serde_json::json!` so the shapes are checked at
//! compile time.

use ehome_core::filters::Metadata;
use serde::Serialize;

/// `{ "room": T }`
#[derive(Debug, Serialize)]
pub struct RoomResponse<T: Serialize> {
    pub room: T,
}

/// `{ "rooms": [...], "metadata": {...} }` for the paginated room listing.
#[derive(Debug, Serialize)]
pub struct RoomListResponse<T: Serialize> {
    pub rooms: Vec<T>,
    pub metadata: Metadata,
}

/// `{ "furniture": T }`, used for both a single item and the catalog list.
#[derive(Debug, Serialize)]
pub struct FurnitureResponse<T: Serialize> {
    pub furniture: T,
}

/// `{ "message": "..." }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
