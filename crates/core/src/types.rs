//! Primitive aliases shared by every crate in the workspace.

/// Row ids for `rooms` and `furniture` (PostgreSQL BIGSERIAL). Placements
/// have no id of their own; they are keyed by `(room_id, furniture_id)`.
pub type DbId = i64;

/// Server-assigned timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
