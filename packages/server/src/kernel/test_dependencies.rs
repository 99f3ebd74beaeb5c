// TestDependencies - mock implementations for testing
//
// Provides an in-memory identity provider that can be injected into ServerDeps.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::{AuthResponse, BaseIdentityProvider, ServerDeps, Session, User};
use crate::domains::verification::models::ProfileFields;

// =============================================================================
// Mock Identity Provider
// =============================================================================

/// Code sent to non-test numbers by the mock
pub const MOCK_OTP_CODE: &str = "424242";

/// Per-phone verification state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpState {
    OtpSent { code: String },
    Verified,
    Failed,
}

#[derive(Default)]
struct MockState {
    otp: HashMap<String, OtpState>,
    users: HashMap<String, Uuid>,
    profiles: HashMap<Uuid, ProfileFields>,
    sent: Vec<String>,
    profile_lookups: Vec<(String, Uuid)>,
}

/// In-memory stand-in for the identity provider.
///
/// Any verify attempt consumes the pending code, so a caller must start
/// again after a failure.
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    state: Arc<Mutex<MockState>>,
    test_numbers: HashMap<String, String>,
    fail_send: bool,
    omit_session: bool,
    omit_user: bool,
    fail_profile_lookup: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a test number that always receives `code`
    pub fn with_test_number(mut self, phone_number: &str, code: &str) -> Self {
        self.test_numbers
            .insert(phone_number.to_string(), code.to_string());
        self
    }

    /// Make every send fail
    pub fn with_send_failure(mut self) -> Self {
        self.fail_send = true;
        self
    }

    /// Report success on verify but leave out the session
    pub fn without_session(mut self) -> Self {
        self.omit_session = true;
        self
    }

    /// Report success on verify but leave out the user
    pub fn without_user(mut self) -> Self {
        self.omit_user = true;
        self
    }

    /// Make every profile lookup fail
    pub fn with_profile_lookup_failure(mut self) -> Self {
        self.fail_profile_lookup = true;
        self
    }

    /// Seed the profile row the trigger would have created for `phone_number`
    pub fn with_profile(self, phone_number: &str, profile: ProfileFields) -> Self {
        let user_id = self.user_id_for(phone_number);
        self.state.lock().unwrap().profiles.insert(user_id, profile);
        self
    }

    /// Phone numbers an OTP was sent to, in order
    pub fn sent_to(&self) -> Vec<String> {
        self.state.lock().unwrap().sent.clone()
    }

    /// Access tokens and user ids used for profile lookups
    pub fn profile_lookups(&self) -> Vec<(String, Uuid)> {
        self.state.lock().unwrap().profile_lookups.clone()
    }

    pub fn otp_state(&self, phone_number: &str) -> Option<OtpState> {
        self.state.lock().unwrap().otp.get(phone_number).cloned()
    }

    /// Identity id for a phone, created on first use like the real provider
    pub fn user_id_for(&self, phone_number: &str) -> Uuid {
        *self
            .state
            .lock()
            .unwrap()
            .users
            .entry(phone_number.to_string())
            .or_insert_with(Uuid::new_v4)
    }

    /// Wrap the mock in ServerDeps
    pub fn into_deps(self) -> ServerDeps {
        ServerDeps::new(Arc::new(self))
    }
}

#[async_trait]
impl BaseIdentityProvider for MockIdentityProvider {
    async fn send_otp(&self, phone_number: &str) -> Result<()> {
        if self.fail_send {
            return Err(anyhow!("SMS provider unavailable"));
        }

        let code = self
            .test_numbers
            .get(phone_number)
            .cloned()
            .unwrap_or_else(|| MOCK_OTP_CODE.to_string());

        self.user_id_for(phone_number);

        let mut state = self.state.lock().unwrap();
        state.sent.push(phone_number.to_string());
        state
            .otp
            .insert(phone_number.to_string(), OtpState::OtpSent { code });
        Ok(())
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<AuthResponse> {
        let user_id = self.user_id_for(phone_number);

        let mut state = self.state.lock().unwrap();
        match state.otp.get(phone_number).cloned() {
            Some(OtpState::OtpSent { code: expected }) if expected == code => {
                state
                    .otp
                    .insert(phone_number.to_string(), OtpState::Verified);
            }
            Some(OtpState::OtpSent { .. }) => {
                state.otp.insert(phone_number.to_string(), OtpState::Failed);
                return Err(anyhow!("Token has expired or is invalid"));
            }
            _ => return Err(anyhow!("Token has expired or is invalid")),
        }

        let session = Session {
            access_token: format!("access-{}", user_id),
            refresh_token: format!("refresh-{}", user_id),
            expires_in: 3600,
            expires_at: None,
            token_type: "bearer".to_string(),
        };
        let user = User {
            id: user_id,
            phone: Some(phone_number.trim_start_matches('+').to_string()),
            email: None,
            created_at: None,
        };

        Ok(AuthResponse {
            session: (!self.omit_session).then_some(session),
            user: (!self.omit_user).then_some(user),
        })
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
        user_id: Uuid,
    ) -> Result<Option<ProfileFields>> {
        let mut state = self.state.lock().unwrap();
        state
            .profile_lookups
            .push((access_token.to_string(), user_id));

        if self.fail_profile_lookup {
            return Err(anyhow!("permission denied for table profiles"));
        }

        // Row-level policy: a token only sees its own row
        if access_token != format!("access-{}", user_id) {
            return Ok(None);
        }

        Ok(state.profiles.get(&user_id).cloned())
    }
}
