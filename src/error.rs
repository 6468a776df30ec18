use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::join::JoinError;

#[derive(Debug)]
pub enum ApiError {
    Unauthorized(String),
    BadRequest(String),
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(value: JoinError) -> Self {
        match value {
            JoinError::LoginRequired => {
                debug!("join attempted without login");
                ApiError::Unauthorized(value.to_string())
            }
        }
    }
}
