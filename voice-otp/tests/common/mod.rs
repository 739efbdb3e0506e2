//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use voiceotp::{router, AppState, Config};
use wiremock::MockServer;

pub const SUBACCOUNT_ID: &str = "sub-123";
pub const API_KEY: &str = "test-api-key";
pub const SOURCE_NUMBER: &str = "+15550001111";
pub const CALLFLOWS_PATH: &str = "/api/v1/subaccounts/sub-123/callflows";

/// Fully configured provider pointing at `base_url`, no Okta secret.
pub fn test_config(base_url: &str) -> Config {
    Config {
        port: 0,
        subaccount_id: Some(SUBACCOUNT_ID.to_string()),
        api_key: Some(API_KEY.to_string()),
        source_number: Some(SOURCE_NUMBER.to_string()),
        voice_profile: "en-US-Jenny".to_string(),
        otp_repetitions: 2,
        voice_base_url: base_url.to_string(),
        voice_request_timeout_ms: None,
        okta_secret: None,
    }
}

pub fn test_app(config: Config) -> Router {
    router(AppState::new(config).expect("failed to build app state"))
}

/// Okta hook body with the given profile values.
pub fn hook_body(mobile_phone: Option<&str>, phone_number: Option<&str>, otp_code: &str) -> Value {
    json!({
        "eventType": "com.okta.telephony.provider",
        "data": {
            "userProfile": { "mobilePhone": mobile_phone },
            "messageProfile": {
                "phoneNumber": phone_number,
                "otpCode": otp_code,
                "deliveryChannel": "VOICE CALL"
            }
        }
    })
}

/// POST a raw JSON body to the hook endpoint and decode the JSON response.
pub async fn post_hook(app: Router, body: String, authorization: Option<&str>) -> (StatusCode, Value) {
    post_hook_as(app, body, Some("application/json"), authorization).await
}

/// Like [`post_hook`] with an explicit (or no) `Content-Type`.
pub async fn post_hook_as(
    app: Router,
    body: String,
    content_type: Option<&str>,
    authorization: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri("/okta-voice-otp");

    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(auth) = authorization {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let request = builder.body(Body::from(body)).unwrap();
    let response = app.oneshot(request).await.expect("failed to make request");
    read_json(response).await
}

pub async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body = serde_json::from_slice(&body_bytes).expect("response should be valid JSON");
    (status, body)
}

/// Poll the mock until it has seen at least `count` requests.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..100 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= count {
            return requests;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("mock server did not receive {} request(s)", count);
}
