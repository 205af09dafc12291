//! Catalog furniture model and DTOs.

use ehome_core::shape::Shape;
use ehome_core::types::DbId;
use ehome_core::validation::FurnitureFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `furniture` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Furniture {
    pub id: DbId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub width: i64,
    pub height: i64,
    /// Path or URL of the item's picture.
    pub image: String,
    #[sqlx(try_from = "i16")]
    pub shape: Shape,
}

impl Furniture {
    pub fn fields(&self) -> FurnitureFields<'_> {
        FurnitureFields {
            name: &self.name,
            price: self.price,
            description: self.description.as_deref(),
            width: self.width,
            height: self.height,
            image: &self.image,
        }
    }
}

/// DTO for creating a catalog item.
///
/// Missing fields decode to their zero value so validation can report them
/// as "must be provided".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateFurniture {
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub width: i64,
    pub height: i64,
    pub image: String,
    pub shape: Shape,
}

impl CreateFurniture {
    pub fn fields(&self) -> FurnitureFields<'_> {
        FurnitureFields {
            name: &self.name,
            price: self.price,
            description: self.description.as_deref(),
            width: self.width,
            height: self.height,
            image: &self.image,
        }
    }
}

/// DTO for patching a catalog item. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateFurniture {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub image: Option<String>,
    pub shape: Option<Shape>,
}

impl UpdateFurniture {
    /// The record `current` would become once this patch is applied.
    pub fn merged(&self, current: &Furniture) -> Furniture {
        Furniture {
            id: current.id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            price: self.price.unwrap_or(current.price),
            description: self
                .description
                .clone()
                .or_else(|| current.description.clone()),
            width: self.width.unwrap_or(current.width),
            height: self.height.unwrap_or(current.height),
            image: self.image.clone().unwrap_or_else(|| current.image.clone()),
            shape: self.shape.unwrap_or(current.shape),
        }
    }
}
