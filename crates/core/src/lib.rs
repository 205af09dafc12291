//! Domain core for the EHome room planner.
//!
//! Holds the pieces that carry invariants but no I/O: shared id/timestamp
//! types, the error taxonomy, the validation layer, and the
//! filter/pagination engine used by room listing.

pub mod error;
pub mod filters;
pub mod roles;
pub mod shape;
pub mod types;
pub mod validation;
