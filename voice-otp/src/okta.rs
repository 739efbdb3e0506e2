//! Okta telephony inline hook types.
//!
//! Okta calls the hook with a large event envelope; only
//! `data.userProfile` and `data.messageProfile` matter here; everything else
//! is ignored. The response must be a command list in Okta's shape.

use serde::{de, de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Command type Okta expects for telephony results.
pub const TELEPHONY_ACTION: &str = "com.okta.telephony.action";

/// Provider name reported back to Okta.
pub const PROVIDER_NAME: &str = "8x8-voice";

/// Status reported back to Okta once the request is accepted.
pub const STATUS_SUCCESSFUL: &str = "SUCCESSFUL";

// =============================================================================
// Inbound Hook
// =============================================================================

/// Inbound telephony hook body.
///
/// Every field is read leniently: a value of the wrong type never fails the
/// whole body. A non-object `data` is missing, a falsy profile is missing,
/// and a non-string phone number or OTP code is absent.
#[derive(Debug, Default, Deserialize)]
pub struct TelephonyHookRequest {
    #[serde(default, deserialize_with = "lenient_object")]
    pub data: Option<HookData>,
}

/// The `data` object of the hook.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookData {
    #[serde(default, deserialize_with = "lenient_profile")]
    pub user_profile: Option<UserProfile>,
    #[serde(default, deserialize_with = "lenient_profile")]
    pub message_profile: Option<MessageProfile>,
}

/// Subset of the Okta user profile.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub mobile_phone: Option<String>,
}

/// What Okta wants delivered and where.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageProfile {
    /// Overrides the profile's mobile phone when present
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub otp_code: Option<String>,
}

/// Why a request body is not JSON the hook can read at all.
///
/// These are not caller-facing payload errors; the handler answers them with
/// a generic 500.
#[derive(Debug, Error)]
pub enum BodyParseError {
    #[error("malformed JSON body: {0}")]
    Syntax(#[from] serde_json::Error),

    /// Only objects and arrays are accepted at the top level.
    #[error("JSON body must be an object or array")]
    NotObjectOrArray,
}

/// Why a hook body could not be turned into an [`OtpDelivery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// Body lacks `data`, `userProfile` or `messageProfile`.
    #[error("Invalid payload structure")]
    InvalidStructure,

    /// Profiles are present but phone number or OTP code is empty or not a string.
    #[error("Missing required fields")]
    MissingFields,
}

/// A resolved delivery request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDelivery {
    pub phone_number: String,
    pub otp_code: String,
}

/// Parse a raw JSON request body.
///
/// An empty body is an empty object. Anything else must be a JSON object or
/// array; scalars at the top level are rejected like syntax errors.
pub fn parse_hook_body(body: &[u8]) -> Result<Value, BodyParseError> {
    if body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice(body)? {
        value @ (Value::Object(_) | Value::Array(_)) => Ok(value),
        _ => Err(BodyParseError::NotObjectOrArray),
    }
}

impl TelephonyHookRequest {
    /// Read the hook fields out of an already parsed body. A body that is not
    /// an object simply has no `data`.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        serde_json::from_value(value).unwrap_or_default()
    }

    /// Resolve the phone number and OTP code.
    ///
    /// `messageProfile.phoneNumber` wins over `userProfile.mobilePhone`; an
    /// empty string counts as absent.
    pub fn into_delivery(self) -> Result<OtpDelivery, PayloadError> {
        let data = self.data.ok_or(PayloadError::InvalidStructure)?;
        let (user, message) = match (data.user_profile, data.message_profile) {
            (Some(user), Some(message)) => (user, message),
            _ => return Err(PayloadError::InvalidStructure),
        };

        let phone_number = non_empty(message.phone_number).or_else(|| non_empty(user.mobile_phone));
        let otp_code = non_empty(message.otp_code);

        match (phone_number, otp_code) {
            (Some(phone_number), Some(otp_code)) => Ok(OtpDelivery {
                phone_number,
                otp_code,
            }),
            _ => Err(PayloadError::MissingFields),
        }
    }
}

/// Truthiness as the hook's callers understand it: `null`, `false`, `0` and
/// `""` are absent, everything else is present.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// An object is parsed; anything else counts as missing.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// A profile is present when truthy. A truthy non-object (e.g. `true`) is a
/// present profile with no usable fields.
fn lenient_profile<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value)
            .map(Some)
            .map_err(de::Error::custom),
        value if is_truthy(&value) => Ok(Some(T::default())),
        _ => Ok(None),
    }
}

/// Strings are kept; any other type is treated as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// =============================================================================
// Acknowledgment
// =============================================================================

/// Response body Okta expects from a telephony hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelephonyHookResponse {
    pub commands: Vec<HookCommand>,
}

/// One command in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookCommand {
    #[serde(rename = "type")]
    pub command_type: String,
    pub value: Vec<TelephonyResult>,
}

/// Outcome of the telephony action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelephonyResult {
    pub status: String,
    pub provider: String,
}

impl TelephonyHookResponse {
    /// The acknowledgment sent as soon as a request is accepted.
    pub fn successful() -> Self {
        Self {
            commands: vec![HookCommand {
                command_type: TELEPHONY_ACTION.to_string(),
                value: vec![TelephonyResult {
                    status: STATUS_SUCCESSFUL.to_string(),
                    provider: PROVIDER_NAME.to_string(),
                }],
            }],
        }
    }
}
