//! Server dependencies for request handlers (using traits for testability)
//!
//! This module provides the dependency container shared by every handler.
//! External services sit behind trait abstractions so tests can swap them.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use supabase::SupabaseService;
use uuid::Uuid;

use crate::domains::verification::models::ProfileFields;
use crate::kernel::{AuthResponse, BaseIdentityProvider};

// =============================================================================
// SupabaseService Adapter (implements BaseIdentityProvider trait)
// =============================================================================

/// Wrapper around SupabaseService that implements BaseIdentityProvider trait
pub struct SupabaseAdapter(pub Arc<SupabaseService>);

impl SupabaseAdapter {
    pub fn new(service: Arc<SupabaseService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseIdentityProvider for SupabaseAdapter {
    async fn send_otp(&self, phone_number: &str) -> Result<()> {
        self.0
            .send_otp(phone_number)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn verify_otp(&self, phone_number: &str, code: &str) -> Result<AuthResponse> {
        self.0
            .verify_otp(phone_number, code)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn fetch_profile(
        &self,
        access_token: &str,
        user_id: Uuid,
    ) -> Result<Option<ProfileFields>> {
        self.0
            .select_one::<ProfileFields>(
                "profiles",
                &[("id", user_id.to_string())],
                ProfileFields::COLUMNS,
                access_token,
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub identity: Arc<dyn BaseIdentityProvider>,
}

impl ServerDeps {
    pub fn new(identity: Arc<dyn BaseIdentityProvider>) -> Self {
        Self { identity }
    }
}
