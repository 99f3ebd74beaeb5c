//! Verification domain actions - business logic functions
//!
//! Actions are async functions called directly from the HTTP handlers.

mod start_verification;
mod verify_code;

pub use start_verification::start_verification;
pub use verify_code::verify_code;

use tracing::debug;

use super::errors::VerificationError;
use super::models::validate_phone_number;

/// Validate a submitted phone number, returning its normalized form.
fn require_phone_number(input: Option<String>) -> Result<String, VerificationError> {
    let validation = validate_phone_number(input.as_deref().unwrap_or_default());

    let Some(normalized) = validation.normalized else {
        let message = validation
            .error
            .unwrap_or_else(|| "Invalid phone number format".to_string());
        debug!(error = %message, "Rejected phone number");
        return Err(VerificationError::InvalidPhoneNumber(message));
    };

    if validation.is_test_number {
        debug!(phone_number = %normalized, "Test phone number");
    }

    Ok(normalized)
}
