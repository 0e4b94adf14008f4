use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;

use crate::twilio::SendError;

/// Error boundary for the HTTP layer: every failure during a request becomes
/// a JSON `{"detail": ...}` response and the process keeps serving.
pub enum AppError {
    /// The request body failed validation; no send was attempted.
    BadRequest(String),
    /// The send was attempted and the provider call failed.
    Send(SendError),
    /// Anything else that went wrong while handling the request.
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            AppError::Send(err) => {
                error!("Failed to send alert: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to send: {}", err),
                )
            }
            AppError::Internal(err) => {
                error!("Request handling failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
