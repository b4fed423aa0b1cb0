use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::guidance::requester::GenerationFailure;
use crate::profile::validation::MissingField;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the current attempt; nothing is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing required fields: {}", field_list(.0))]
    MissingFields(Vec<MissingField>),

    #[error("File size too large. Please upload an image under 5MB.")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Failed to read the file: {0}")]
    DecodeFailure(String),

    #[error(transparent)]
    Generation(#[from] GenerationFailure),

    #[error("A guidance request is already in progress for this session")]
    Busy,

    #[error("Too many active sessions. Please try again later.")]
    SessionLimit,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn field_list(fields: &[MissingField]) -> String {
    fields
        .iter()
        .map(|f| f.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// The message shown to the end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            AppError::DecodeFailure(_) => "Failed to read the file. Please try again.".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Validation(_) | AppError::MissingFields(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::FileTooLarge { size, limit } => {
                tracing::warn!("Rejected upload of {size} bytes (limit {limit})");
                (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE")
            }
            AppError::DecodeFailure(detail) => {
                tracing::warn!("Upload decode failure: {detail}");
                (StatusCode::BAD_REQUEST, "DECODE_FAILURE")
            }
            AppError::Generation(_) => (StatusCode::BAD_GATEWAY, "GENERATION_FAILURE"),
            AppError::Busy => (StatusCode::CONFLICT, "REQUEST_IN_FLIGHT"),
            AppError::SessionLimit => {
                tracing::warn!("Session limit reached; refusing new session");
                (StatusCode::SERVICE_UNAVAILABLE, "SESSION_LIMIT")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let mut error = json!({
            "code": code,
            "message": self.user_message(),
        });
        if let AppError::MissingFields(fields) = &self {
            error["fields"] = json!(fields);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let e = AppError::FileTooLarge {
            size: 6_000_000,
            limit: 5_242_880,
        };
        assert_eq!(
            e.user_message(),
            "File size too large. Please upload an image under 5MB."
        );
        assert_eq!(e.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_decode_failure_hides_detail() {
        let e = AppError::DecodeFailure("multipart stream ended early".into());
        assert_eq!(e.user_message(), "Failed to read the file. Please try again.");
    }

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let e = AppError::MissingFields(vec![
            MissingField {
                field: "name".into(),
                reason: "required".into(),
            },
            MissingField {
                field: "strengths".into(),
                reason: "required".into(),
            },
        ]);
        assert_eq!(e.to_string(), "Missing required fields: name, strengths");
        assert_eq!(e.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::Busy.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::SessionLimit.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Generation(GenerationFailure::new())
                .into_response()
                .status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
