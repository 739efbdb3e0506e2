//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup into an immutable [`Config`] that the
//! web layer and the voice client share.

use std::env;
use std::str::FromStr;
use tracing::warn;

/// Default base URL of the 8x8 (Wavecell) voice API.
pub const DEFAULT_VOICE_BASE_URL: &str = "https://voice.wavecell.com";

/// Default text-to-speech voice.
pub const DEFAULT_VOICE_PROFILE: &str = "en-US-Jenny";

/// Default number of times the provider repeats the spoken phrase.
pub const DEFAULT_OTP_REPETITIONS: u32 = 2;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    // =========================================================================
    // 8x8 Voice Provider
    // =========================================================================

    /// 8x8 subaccount the callflows are created under
    pub subaccount_id: Option<String>,

    /// 8x8 API key, sent as a bearer token
    pub api_key: Option<String>,

    /// Caller ID used for outbound calls
    pub source_number: Option<String>,

    /// Text-to-speech voice profile
    pub voice_profile: String,

    /// How many times the provider repeats the spoken phrase
    pub otp_repetitions: u32,

    /// Base URL of the voice API (overridable for testing)
    pub voice_base_url: String,

    /// Optional outbound request timeout in milliseconds
    pub voice_request_timeout_ms: Option<u64>,

    // =========================================================================
    // Okta
    // =========================================================================

    /// Shared secret expected in the `Authorization` header of inbound hooks
    pub okta_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 3000),

            subaccount_id: non_empty("EIGHTYEIGHTX_SUBACCOUNT_ID"),

            api_key: non_empty("EIGHTYEIGHTX_API_KEY"),

            source_number: non_empty("EIGHTYEIGHTX_SOURCE_NUMBER"),

            voice_profile: non_empty("VOICE_PROFILE")
                .unwrap_or_else(|| DEFAULT_VOICE_PROFILE.to_string()),

            otp_repetitions: parse_repetitions("OTP_REPETITIONS"),

            voice_base_url: non_empty("EIGHTYEIGHTX_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_VOICE_BASE_URL.to_string()),

            voice_request_timeout_ms: env::var("VOICE_REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok()),

            // Compared verbatim against the header, so never trimmed
            okta_secret: non_blank_raw("OKTA_SECRET"),
        }
    }

    /// Whether all credentials needed to place a call are present.
    pub fn voice_provider_configured(&self) -> bool {
        self.subaccount_id.is_some() && self.api_key.is_some() && self.source_number.is_some()
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a variable exactly as set, treating empty values as unset.
fn non_blank_raw(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Parse a variable, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Parse the repetition count. Zero is not a usable repetition, so it
/// falls back to the default just like an unparseable value.
fn parse_repetitions(name: &str) -> u32 {
    match parse_or(name, DEFAULT_OTP_REPETITIONS) {
        0 => {
            warn!(env_var = name, "Zero repetitions, using default");
            DEFAULT_OTP_REPETITIONS
        }
        n => n,
    }
}
