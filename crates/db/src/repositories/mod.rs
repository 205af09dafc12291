//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument. Every operation runs under
//! [`crate::QUERY_TIMEOUT`]. Absence is reported as `None`/`false`, except
//! that [`PlacementRepo::delete_for_room`] rejects ids below 1 with
//! `sqlx::Error::RowNotFound`.

pub mod furniture_repo;
pub mod placement_repo;
pub mod room_repo;

pub use furniture_repo::FurnitureRepo;
pub use placement_repo::PlacementRepo;
pub use room_repo::RoomRepo;
