//! Web server module for the Okta telephony hook.
//!
//! This module provides a thin web server that:
//! - Receives telephony inline hooks from Okta
//! - Verifies the optional shared secret
//! - Acknowledges immediately and places the voice call in the background
//!
//! Panics in any route are turned into a generic 500 by `CatchPanicLayer`.

pub mod error;
pub mod handlers;
pub mod validator;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use error::{handle_panic, ErrorResponse, WebhookError};
pub use handlers::{health, okta_voice_otp, AppState, HealthResponse};
pub use validator::validate_okta_request;

/// Path Okta is configured to call.
pub const WEBHOOK_PATH: &str = "/okta-voice-otp";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(WEBHOOK_PATH, post(okta_voice_otp))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
