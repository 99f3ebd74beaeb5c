//! Verify code action

use tracing::{info, warn};

use crate::domains::verification::errors::VerificationError;
use crate::domains::verification::models::ProfileFields;
use crate::domains::verification::types::{VerifiedUser, VerifyCodeRequest, VerifyCodeResponse};
use crate::kernel::ServerDeps;

use super::require_phone_number;

const VERIFICATION_CODE_LENGTH: usize = 6;

/// Redeem an SMS code for a session and attach the caller's profile.
///
/// The profile is read with the new session's token, so the store's
/// row-level policy applies. A failed read degrades to empty fields.
pub async fn verify_code(
    request: VerifyCodeRequest,
    deps: &ServerDeps,
) -> Result<VerifyCodeResponse, VerificationError> {
    let phone_number = require_phone_number(request.phone_number)?;

    let code = request
        .verification_code
        .filter(|code| code.chars().count() == VERIFICATION_CODE_LENGTH)
        .ok_or(VerificationError::InvalidVerificationCode)?;

    let auth = deps
        .identity
        .verify_otp(&phone_number, &code)
        .await
        .map_err(VerificationError::CodeRejected)?;

    let session = auth.session.ok_or(VerificationError::MissingSession)?;
    let user = auth.user.ok_or(VerificationError::MissingUser)?;

    let profile = match deps
        .identity
        .fetch_profile(&session.access_token, user.id)
        .await
    {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            warn!(user_id = %user.id, "No profile row visible for verified user");
            ProfileFields::default()
        }
        Err(e) => {
            warn!(user_id = %user.id, error = %e, "Failed to fetch profile");
            ProfileFields::default()
        }
    };

    info!(user_id = %user.id, "Phone number verified");

    Ok(VerifyCodeResponse {
        message: "Phone number verified successfully".to_string(),
        session,
        user: VerifiedUser {
            id: user.id,
            phone: user.phone,
            profile,
        },
    })
}
