//! Okta Voice OTP - reads one-time passcodes to users over the phone.
//!
//! Okta's telephony inline hook calls this service when a user picks voice
//! as their verification factor. The service answers Okta at once and asks
//! the 8x8 voice API to call the user and read the code aloud.
//!
//! ## Architecture
//!
//! ```text
//! Okta → web (validate, extract, acknowledge) ─┬→ 200 to Okta
//!                                              └→ voice (spawned) → 8x8
//! ```

pub mod config;
pub mod okta;
pub mod util;
pub mod voice;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use okta::{
    parse_hook_body, BodyParseError, OtpDelivery, PayloadError, TelephonyHookRequest,
    TelephonyHookResponse,
};
pub use voice::{DispatchError, VoiceClient};
pub use web::{router, AppState};
