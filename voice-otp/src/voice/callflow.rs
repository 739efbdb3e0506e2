//! Callflow payload for the 8x8 voice API.
//!
//! A callflow is the ordered script the provider executes: dial, speak, hang up.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/subaccounts/{id}/callflows`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callflow {
    pub callflow: Vec<CallAction>,
}

/// A single step of a callflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "camelCase")]
pub enum CallAction {
    /// Place the outbound call
    MakeCall { source: String, destination: String },
    /// Speak text with the given voice
    #[serde(rename_all = "camelCase")]
    Say {
        text: String,
        voice_profile: String,
        repetition: u32,
    },
    /// End the call
    Hangup,
}

impl Callflow {
    /// Build the three-step script that reads `otp_code` to `destination`.
    pub fn for_otp(
        source: &str,
        destination: &str,
        otp_code: &str,
        voice_profile: &str,
        repetition: u32,
    ) -> Self {
        Callflow {
            callflow: vec![
                CallAction::MakeCall {
                    source: source.to_string(),
                    destination: destination.to_string(),
                },
                CallAction::Say {
                    text: spoken_text(otp_code),
                    voice_profile: voice_profile.to_string(),
                    repetition,
                },
                CallAction::Hangup,
            ],
        }
    }
}

/// Spell a code character by character, e.g. `"482"` → `"4, 8, 2"`.
///
/// The commas make the text-to-speech engine pause between digits.
pub fn spell_otp(otp_code: &str) -> String {
    otp_code
        .chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The phrase read to the user. The code is spoken twice within one phrase.
pub fn spoken_text(otp_code: &str) -> String {
    let spelled = spell_otp(otp_code);
    format!(
        "Your verification code is {spelled}. I repeat, your verification code is {spelled}."
    )
}
