//! Structural checks for furniture, rooms and placements.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

use super::errors::ValidationErrors;

/// Maximum furniture name length in characters.
pub const MAX_FURNITURE_NAME_LENGTH: usize = 50;

/// Maximum image reference length in characters.
pub const MAX_IMAGE_LENGTH: usize = 200;

/// Maximum room title length in characters.
pub const MAX_ROOM_TITLE_LENGTH: usize = 30;

/// Maximum description length for both rooms and furniture.
pub const MAX_DESCRIPTION_LENGTH: usize = 400;

/// Field name used for a room's placement list in request payloads.
pub const PLACEMENT_LIST_FIELD: &str = "furniture_list";

/// Borrowed view of a catalog item, as stored or as about to be stored.
#[derive(Debug, Clone, Copy)]
pub struct FurnitureFields<'a> {
    pub name: &'a str,
    pub price: f64,
    pub description: Option<&'a str>,
    pub width: i64,
    pub height: i64,
    pub image: &'a str,
}

/// Borrowed view of a room's scalar fields.
#[derive(Debug, Clone, Copy)]
pub struct RoomFields<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub width: i64,
    pub height: i64,
}

/// One requested placement of a catalog item inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementFields {
    pub furniture_id: DbId,
    pub x: i64,
    pub y: i64,
}

fn max_length_message(max: usize) -> String {
    format!("must not be more than {max} characters long")
}

fn check_dimension(errors: &mut ValidationErrors, field: &str, value: i64) {
    // Zero means the client never sent the field.
    errors.check(value != 0, field, "must be provided");
    errors.check(value > 0, field, "must be greater than zero");
}

fn check_description(errors: &mut ValidationErrors, description: Option<&str>) {
    if let Some(description) = description {
        errors.check(
            description.chars().count() <= MAX_DESCRIPTION_LENGTH,
            "description",
            &max_length_message(MAX_DESCRIPTION_LENGTH),
        );
    }
}

/// Check a catalog item.
pub fn validate_furniture(furniture: &FurnitureFields<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    errors.check(!furniture.name.is_empty(), "name", "must be provided");
    errors.check(
        furniture.name.chars().count() <= MAX_FURNITURE_NAME_LENGTH,
        "name",
        &max_length_message(MAX_FURNITURE_NAME_LENGTH),
    );

    errors.check(
        furniture.price.is_finite() && furniture.price > 0.0,
        "price",
        "must be greater than zero",
    );

    check_description(&mut errors, furniture.description);
    check_dimension(&mut errors, "width", furniture.width);
    check_dimension(&mut errors, "height", furniture.height);

    errors.check(!furniture.image.is_empty(), "image", "must be provided");
    errors.check(
        furniture.image.chars().count() <= MAX_IMAGE_LENGTH,
        "image",
        &max_length_message(MAX_IMAGE_LENGTH),
    );

    errors
}

/// Check a room's scalar fields. Placements are checked separately with
/// [`validate_placements`].
pub fn validate_room(room: &RoomFields<'_>) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    errors.check(!room.title.is_empty(), "title", "must be provided");
    errors.check(
        room.title.chars().count() <= MAX_ROOM_TITLE_LENGTH,
        "title",
        &max_length_message(MAX_ROOM_TITLE_LENGTH),
    );

    check_description(&mut errors, room.description);
    check_dimension(&mut errors, "width", room.width);
    check_dimension(&mut errors, "height", room.height);

    errors
}

/// Check a single placement, reporting under `prefix` (e.g. `furniture_list[0]`).
/// An empty prefix reports bare field names.
pub fn validate_placement(placement: &PlacementFields, prefix: &str) -> ValidationErrors {
    let field = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        }
    };

    let mut errors = ValidationErrors::new();
    errors.check(
        placement.furniture_id != 0,
        &field("furniture_id"),
        "must be provided",
    );
    errors.check(
        placement.furniture_id > 0,
        &field("furniture_id"),
        "must be a positive number",
    );
    errors.check(placement.x >= 0, &field("x"), "must not be negative");
    errors.check(placement.y >= 0, &field("y"), "must not be negative");
    errors
}

/// Check a full placement list: every entry, plus uniqueness of furniture
/// ids (a room holds at most one placement per catalog item).
pub fn validate_placements(placements: &[PlacementFields]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    let mut seen = HashSet::with_capacity(placements.len());

    for (index, placement) in placements.iter().enumerate() {
        let prefix = format!("{PLACEMENT_LIST_FIELD}[{index}]");
        errors.merge(validate_placement(placement, &prefix));

        if !seen.insert(placement.furniture_id) {
            errors.add(
                format!("{prefix}.furniture_id"),
                "duplicates an earlier placement of the same furniture",
            );
        }
    }

    errors
}

/// Ensure every placement names a furniture id from `catalog_ids`.
///
/// Reports the first unknown id in list order.
pub fn check_references(
    placements: &[PlacementFields],
    catalog_ids: &HashSet<DbId>,
) -> Result<(), CoreError> {
    match placements
        .iter()
        .find(|p| !catalog_ids.contains(&p.furniture_id))
    {
        Some(missing) => Err(CoreError::ReferenceInvalid {
            furniture_id: missing.furniture_id,
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
