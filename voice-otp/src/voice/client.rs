//! HTTP client for the 8x8 voice API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use super::callflow::Callflow;
use super::error::{DispatchError, Result};
use crate::util::mask_phone_number;
use crate::Config;

/// Parsed provider response body. Only the status and `message` are inspected.
pub type ProviderResponse = serde_json::Value;

/// Fallback when an error response carries no `message` field.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Client that submits OTP callflows to 8x8.
///
/// Cheap to clone: the underlying connection pool and configuration are shared.
#[derive(Clone)]
pub struct VoiceClient {
    client: Client,
    config: Arc<Config>,
}

impl VoiceClient {
    /// Create a client from the shared configuration.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(ms) = config.voice_request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Endpoint that creates callflows for `subaccount_id`.
    pub fn callflows_url(&self, subaccount_id: &str) -> String {
        format!(
            "{}/api/v1/subaccounts/{}/callflows",
            self.config.voice_base_url, subaccount_id
        )
    }

    /// Place one call that reads `otp_code` to `phone_number`.
    ///
    /// Exactly one request is made; there is no retry. Resolves with the parsed
    /// body on a 2xx response.
    pub async fn send_voice_otp(
        &self,
        phone_number: &str,
        otp_code: &str,
    ) -> Result<ProviderResponse> {
        let subaccount_id = self
            .config
            .subaccount_id
            .as_deref()
            .ok_or(DispatchError::NotConfigured("EIGHTYEIGHTX_SUBACCOUNT_ID"))?;
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(DispatchError::NotConfigured("EIGHTYEIGHTX_API_KEY"))?;
        let source_number = self
            .config
            .source_number
            .as_deref()
            .ok_or(DispatchError::NotConfigured("EIGHTYEIGHTX_SOURCE_NUMBER"))?;

        let callflow = Callflow::for_otp(
            source_number,
            phone_number,
            otp_code,
            &self.config.voice_profile,
            self.config.otp_repetitions,
        );

        info!(
            destination = %mask_phone_number(phone_number),
            voice_profile = %self.config.voice_profile,
            repetition = self.config.otp_repetitions,
            otp_length = otp_code.len(),
            "voice_call_requesting"
        );

        let resp = self
            .client
            .post(self.callflows_url(subaccount_id))
            .bearer_auth(api_key)
            .json(&callflow)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.bytes().await?;

        let parsed: ProviderResponse = match serde_json::from_slice(&body) {
            Ok(v) => v,
            Err(e) => {
                error!(
                    status_code = status.as_u16(),
                    body_length = body.len(),
                    error = %e,
                    "voice_call_response_parse_failed"
                );
                return Err(DispatchError::InvalidResponse {
                    status: status.as_u16(),
                    source: e,
                });
            }
        };

        if status.is_success() {
            info!(
                status_code = status.as_u16(),
                response = %parsed,
                "voice_call_initiated"
            );
            return Ok(parsed);
        }

        let message = parsed
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or(UNKNOWN_ERROR)
            .to_string();

        error!(
            status_code = status.as_u16(),
            response = %parsed,
            "voice_call_api_error"
        );

        Err(DispatchError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
