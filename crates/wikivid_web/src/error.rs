use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;
use wikivid_core::{Error, ErrorKind, PipelineError};

/// Everything a handler can fail with, mapped onto status codes and
/// `{"detail": ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    Pipeline(PipelineError),
    InvalidBody(String),
    VideoNotFound,
    Internal(Error),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if err.is_not_found() {
            ApiError::VideoNotFound
        } else {
            ApiError::Internal(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Pipeline(err) => match err.kind() {
                ErrorKind::NotFound => (
                    StatusCode::NOT_FOUND,
                    json!({ "detail": "Article not found" }),
                ),
                ErrorKind::InvalidReference => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "detail": err.source.to_string() }),
                ),
                ErrorKind::Internal => {
                    error!("Video creation failed: {}", err);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "detail": err.source.to_string(), "stage": err.stage }),
                    )
                }
            },
            ApiError::InvalidBody(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": detail }))
            }
            ApiError::VideoNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "detail": "Video not found" }),
            ),
            ApiError::Internal(err) => {
                error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": err.to_string() }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
