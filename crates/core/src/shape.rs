//! Footprint shape of a catalog furniture item.
//!
//! Carried as a small integer both on the wire and in the `furniture.shape`
//! column: `0` is a rectangle, `1` is a circle. The shape is recorded for
//! future layout checks; nothing in the planner interprets it geometrically.

use serde::{Deserialize, Serialize};

/// Wire/storage code for [`Shape::Rectangle`].
pub const SHAPE_RECTANGLE: i16 = 0;

/// Wire/storage code for [`Shape::Circle`].
pub const SHAPE_CIRCLE: i16 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub enum Shape {
    #[default]
    Rectangle,
    Circle,
}

/// Returned when a stored or submitted shape code is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape code {0}, expected 0 (rectangle) or 1 (circle)")]
pub struct InvalidShape(pub i16);

impl TryFrom<i16> for Shape {
    type Error = InvalidShape;

    fn try_from(code: i16) -> Result<Self, Self::Error> {
        match code {
            SHAPE_RECTANGLE => Ok(Shape::Rectangle),
            SHAPE_CIRCLE => Ok(Shape::Circle),
            other => Err(InvalidShape(other)),
        }
    }
}

impl From<Shape> for i16 {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Rectangle => SHAPE_RECTANGLE,
            Shape::Circle => SHAPE_CIRCLE,
        }
    }
}
