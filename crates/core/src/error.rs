use crate::types::DbId;
use crate::validation::ValidationErrors;

/// Domain-level failures shared by the store and HTTP layers.
///
/// Storage failures are not represented here: repositories surface them as
/// `sqlx::Error` and the API layer maps them separately.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A placement names a furniture id that is not in the catalog.
    #[error("No furniture with id {furniture_id}")]
    ReferenceInvalid { furniture_id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The caller is authenticated but does not own the target record.
    #[error("{entity} {id} belongs to another user")]
    ForeignOwner { entity: &'static str, id: DbId },

    /// Reserved for version-checked updates; nothing raises it yet.
    #[error("Edit conflict on {entity} {id}")]
    EditConflict { entity: &'static str, id: DbId },
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn validation_errors_convert_into_core_error() {
        let err: CoreError = ValidationErrors::single("title", "must be provided").into();
        assert_matches!(&err, CoreError::Validation(fields) if fields.get("title") == Some("must be provided"));
        assert_eq!(err.to_string(), "Validation failed: title: must be provided");
    }

    #[test]
    fn messages_name_the_entity() {
        let err = CoreError::ForeignOwner { entity: "Room", id: 4 };
        assert_eq!(err.to_string(), "Room 4 belongs to another user");

        let err = CoreError::NotFound { entity: "Furniture", id: 9 };
        assert_eq!(err.to_string(), "Entity not found: Furniture with id 9");
    }
}
