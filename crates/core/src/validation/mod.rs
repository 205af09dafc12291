//! Validation layer.
//!
//! Every check is a pure function that returns a [`ValidationErrors`]
//! value. Callers merge the values they collect and decide once whether to
//! reject the request, so a single response can report every problem.

pub mod errors;
pub mod rules;

pub use errors::ValidationErrors;
pub use rules::{
    check_references, validate_furniture, validate_placement, validate_placements,
    validate_room, FurnitureFields, PlacementFields, RoomFields,
};
