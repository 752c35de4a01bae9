use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hermes_pooling::error::PoolingError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    InternalServerError(String),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<PoolingError> for ApiError {
    fn from(error: PoolingError) -> Self {
        match error {
            PoolingError::PoolNotFound(_) | PoolingError::RequestNotFound(_) => {
                ApiError::NotFound(error.to_string())
            }
            PoolingError::DuplicateRequest(_) => ApiError::Conflict(error.to_string()),
            PoolingError::MissingField(_) => ApiError::BadRequest(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Conflict(message) => (StatusCode::CONFLICT, message).into_response(),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
        }
    }
}
