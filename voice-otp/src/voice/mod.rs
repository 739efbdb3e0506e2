//! 8x8 voice dispatch.
//!
//! ```text
//! (phone, otp) → Callflow::for_otp() → VoiceClient::send_voice_otp() → 8x8
//! ```
//!
//! The web layer never awaits a dispatch; it hands the call to
//! [`dispatch_in_background`], which logs the outcome.

pub mod callflow;
pub mod client;
pub mod dispatch;
pub mod error;

pub use callflow::{spell_otp, spoken_text, CallAction, Callflow};
pub use client::{ProviderResponse, VoiceClient};
pub use dispatch::dispatch_in_background;
pub use error::DispatchError;
