//! Error responses for the webhook surface.
//!
//! Every failure the caller can see is a small JSON body `{"error": "..."}`.
//! Internal details are logged, never returned.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::okta::PayloadError;

/// Error body returned to the caller.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors a webhook handler can return.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Shared-secret validation failed.
    #[error("Unauthorized")]
    Unauthorized,

    /// The hook body was malformed or incomplete.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// Anything else; the cause is logged where it happens.
    #[error("Internal server error")]
    Internal,
}

impl WebhookError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Payload(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Panic responder for `CatchPanicLayer`.
///
/// Logs the panic message and answers with the generic 500 body.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(panic = %detail, "request_handler_panicked");

    WebhookError::Internal.into_response()
}
