//! Webhook endpoint handlers.
//!
//! The Okta handler only does what must happen before Okta gets its answer:
//! 1. Parse the JSON body
//! 2. Validate the shared secret
//! 3. Resolve phone number and OTP code
//! 4. Spawn the voice call and acknowledge immediately
//!
//! Okta times out inline hooks well before a call is typically set up, so
//! the acknowledgment never waits on 8x8.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderMap,
    },
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

use crate::okta::{parse_hook_body, TelephonyHookRequest, TelephonyHookResponse};
use crate::util::mask_phone_number;
use crate::voice::{self, dispatch_in_background, VoiceClient};
use crate::web::error::WebhookError;
use crate::web::validator::validate_okta_request;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub voice: VoiceClient,
}

impl AppState {
    pub fn new(config: Config) -> voice::error::Result<Self> {
        let config = Arc::new(config);
        let voice = VoiceClient::new(config.clone())?;
        Ok(Self { config, voice })
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// RFC 3339 timestamp with millisecond precision
    pub timestamp: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

// =============================================================================
// Okta Voice OTP Webhook
// =============================================================================

/// Okta telephony inline hook endpoint.
///
/// The JSON body is parsed before anything else, as a body-parsing
/// middleware would: an unreadable body is a generic 500, even for an
/// unauthorized caller. After that a bad shared secret is 401 and a
/// malformed or incomplete hook is 400. Otherwise the voice call is
/// dispatched in the background and Okta gets the success envelope straight
/// away; dispatch failures are only logged.
pub async fn okta_voice_otp(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TelephonyHookResponse>, WebhookError> {
    info!(
        has_authorization = headers.contains_key(AUTHORIZATION),
        body_length = body.as_ref().map(|b| b.len()).unwrap_or(0),
        "okta_webhook_received"
    );

    let body = body.map_err(|e| {
        error!(error = %e, "okta_webhook_body_read_failed");
        WebhookError::Internal
    })?;

    // Non-JSON content types carry no fields
    let parsed = if is_json_content_type(&headers) {
        parse_hook_body(&body).map_err(|e| {
            error!(error = %e, "okta_webhook_body_parse_failed");
            WebhookError::Internal
        })?
    } else {
        Value::Object(Map::new())
    };

    if !validate_okta_request(&headers, state.config.okta_secret.as_deref()) {
        warn!("okta_webhook_unauthorized");
        return Err(WebhookError::Unauthorized);
    }

    let delivery = TelephonyHookRequest::from_value(parsed)
        .into_delivery()
        .map_err(|e| {
            warn!(reason = %e, "okta_webhook_payload_rejected");
            e
        })?;

    info!(
        phone_number = %mask_phone_number(&delivery.phone_number),
        otp_length = delivery.otp_code.len(),
        "okta_voice_otp_accepted"
    );

    // Detached: the handle is dropped and the task keeps running
    dispatch_in_background(state.voice.clone(), delivery.phone_number, delivery.otp_code);

    Ok(Json(TelephonyHookResponse::successful()))
}

/// Whether the request declares an `application/json` body, ignoring
/// parameters such as `charset`.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
