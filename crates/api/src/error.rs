use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ehome_core::error::CoreError;
use ehome_core::validation::ValidationErrors;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`sqlx::Error`] for storage
/// failures.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ehome_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Core(CoreError::Validation(errors))
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(_) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "VALIDATION_ERROR",
                    "Request failed validation".to_string(),
                ),
                CoreError::ReferenceInvalid { .. } => (
                    StatusCode::BAD_REQUEST,
                    "REFERENCE_INVALID",
                    core.to_string(),
                ),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::ForeignOwner { .. } => {
                    (StatusCode::FORBIDDEN, "FOREIGN_OWNER", core.to_string())
                }
                CoreError::EditConflict { .. } => {
                    (StatusCode::CONFLICT, "EDIT_CONFLICT", core.to_string())
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),
        };

        let body = match &self {
            AppError::Core(CoreError::Validation(fields)) => json!({
                "error": message,
                "code": code,
                "fields": fields,
            }),
            _ => json!({
                "error": message,
                "code": code,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Deadline expiry and pool exhaustion map to 503 so callers may retry.
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if ehome_db::is_timeout(err) {
        tracing::warn!(error = %err, "Storage timeout");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            "STORAGE_TIMEOUT",
            "The storage layer did not respond in time".to_string(),
        );
    }

    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("body should be JSON"))
    }

    #[tokio::test]
    async fn validation_errors_carry_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "must be provided");
        errors.add("width", "must be greater than zero");

        let (status, body) = render(errors.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["fields"]["title"], "must be provided");
        assert_eq!(body["fields"]["width"], "must be greater than zero");
    }

    #[tokio::test]
    async fn domain_errors_map_to_their_codes() {
        let (status, body) =
            render(AppError::Core(CoreError::ReferenceInvalid { furniture_id: 9 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "REFERENCE_INVALID");
        assert!(body.get("fields").is_none());

        let (status, body) = render(AppError::Core(CoreError::ForeignOwner {
            entity: "Room",
            id: 1,
        }))
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FOREIGN_OWNER");

        let (status, _) = render(AppError::Core(CoreError::NotFound {
            entity: "Room",
            id: 1,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn storage_timeout_is_retryable() {
        let err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "deadline",
        ));
        let (status, body) = render(AppError::Database(err)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "STORAGE_TIMEOUT");
    }

    #[tokio::test]
    async fn other_storage_errors_are_opaque() {
        let (status, body) = render(AppError::Database(sqlx::Error::PoolClosed)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
    }
}
