use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::clients::ClientError;

/// Infrastructure-level API failures
///
/// Business outcomes (bad dealer id, unauthorized review, duplicate
/// registration) are NOT errors: they travel as embedded status codes inside
/// 200-OK bodies, the contract the frontend was built against. This type
/// covers the failures that have no place in that contract.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("Dealer service error: {0}")]
    DealerService(#[from] ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::DealerService(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
