use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::generation::GenerationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid JSON body: {0}")]
    JsonBody(#[from] JsonRejection),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable code for the `error` field of the envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Config(_) => "config_error",
            Error::BadRequest(_) => "bad_request",
            Error::JsonBody(_) => "invalid_request",
            Error::Unauthorized(_) => "unauthorized",
            Error::Forbidden(_) => "forbidden",
            Error::NotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Validation(_) => "validation_error",
            Error::Generation(GenerationError::InvalidRequest(_)) => "invalid_request",
            Error::Generation(GenerationError::ModelInvocation(_)) => "model_invocation_failure",
            Error::Generation(GenerationError::ModelTimeout(_)) => "model_timeout",
            Error::Generation(GenerationError::NoValidQuestions) => "no_valid_questions",
            _ => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let code = self.code();
        let detail = self.to_string();
        let (status, message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::JsonBody(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            Error::Generation(err) => match err {
                GenerationError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
                GenerationError::ModelInvocation(_) => (
                    StatusCode::BAD_GATEWAY,
                    "Quiz generation failed: the AI model could not be reached".to_string(),
                ),
                GenerationError::ModelTimeout(_) => (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Quiz generation failed: the AI model timed out".to_string(),
                ),
                GenerationError::NoValidQuestions => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "No valid questions were generated, please try again".to_string(),
                ),
            },
            Error::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong".to_string(),
                )
            }
            other => {
                tracing::error!(error = %other, "unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "success": false,
            "message": message,
            "error": code,
        });
        if crate::config::expose_error_details() {
            body["detail"] = json!(detail);
        }
        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    async fn render(err: Error) -> (StatusCode, JsonValue) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn generation_errors_map_to_distinct_statuses() {
        let (status, body) =
            render(GenerationError::InvalidRequest("unknown level 'expert'".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
        assert_eq!(body["success"], false);

        let (status, body) = render(GenerationError::NoValidQuestions.into()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "no_valid_questions");

        let (status, body) =
            render(GenerationError::ModelTimeout(std::time::Duration::from_secs(5)).into()).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"], "model_timeout");
    }

    #[tokio::test]
    async fn model_failure_does_not_leak_vendor_detail() {
        let err = GenerationError::ModelInvocation("Gemini HTTP 403: API key sk-secret".into());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body["message"].as_str().unwrap().contains("sk-secret"));
        assert!(body.get("detail").is_none());
    }

    #[test]
    fn row_not_found_becomes_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
