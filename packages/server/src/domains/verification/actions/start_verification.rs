//! Start verification action

use tracing::info;

use crate::domains::verification::errors::VerificationError;
use crate::domains::verification::types::{StartVerificationRequest, StartVerificationResponse};
use crate::kernel::ServerDeps;

use super::require_phone_number;

/// Validate the phone number and ask the identity provider to text a code.
///
/// Invalid numbers never reach the provider.
pub async fn start_verification(
    request: StartVerificationRequest,
    deps: &ServerDeps,
) -> Result<StartVerificationResponse, VerificationError> {
    let normalized = require_phone_number(request.phone_number)?;

    deps.identity
        .send_otp(&normalized)
        .await
        .map_err(VerificationError::SendFailed)?;

    info!(phone_number = %normalized, "Verification code sent");

    Ok(StartVerificationResponse {
        message: "Verification code sent successfully".to_string(),
        phone_number: normalized,
    })
}
