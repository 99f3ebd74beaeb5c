// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (validation, response shaping) lives in domains/verification.
//
// Naming convention: Base* for trait names (e.g., BaseIdentityProvider)

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::verification::models::ProfileFields;

pub use supabase::models::{AuthResponse, Session, User};

// =============================================================================
// Identity Provider Trait (Infrastructure - SMS OTP + sessions)
// =============================================================================

#[async_trait]
pub trait BaseIdentityProvider: Send + Sync {
    /// Send an OTP code via SMS to the phone number
    async fn send_otp(&self, phone_number: &str) -> Result<()>;

    /// Redeem an OTP code for a session
    ///
    /// Any error means the code was not accepted.
    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<AuthResponse>;

    /// Read the caller's own profile using their freshly issued access token
    async fn fetch_profile(&self, access_token: &str, user_id: Uuid)
        -> Result<Option<ProfileFields>>;
}
