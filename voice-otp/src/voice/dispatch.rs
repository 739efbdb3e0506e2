//! Fire-and-forget voice dispatch.

use tokio::task::JoinHandle;
use tracing::{error, info, info_span, Instrument};

use super::client::{ProviderResponse, VoiceClient};
use super::error::Result;
use crate::util::mask_phone_number;

/// Spawn the voice call onto the runtime without waiting for it.
///
/// The outcome is logged from inside the task. Callers on the request path
/// drop the handle; it is returned so tests and shutdown code can observe
/// the result.
pub fn dispatch_in_background(
    client: VoiceClient,
    phone_number: String,
    otp_code: String,
) -> JoinHandle<Result<ProviderResponse>> {
    let span = info_span!(
        "voice_dispatch",
        destination = %mask_phone_number(&phone_number)
    );

    tokio::spawn(
        async move {
            let result = client.send_voice_otp(&phone_number, &otp_code).await;

            match &result {
                Ok(_) => info!("voice_otp_dispatched"),
                Err(e) => error!(
                    error = %e,
                    provider_error = e.is_provider_error(),
                    status_code = ?e.status(),
                    "voice_otp_dispatch_failed"
                ),
            }

            result
        }
        .instrument(span),
    )
}
