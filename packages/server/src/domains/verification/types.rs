//! Verification wire types
//!
//! One record per fixed response shape; errors share `ErrorResponse`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::ProfileFields;
use crate::kernel::Session;

/// Body of `POST /verification-start`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartVerificationRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Body of `POST /verification-verify`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub verification_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartVerificationResponse {
    pub message: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub message: String,
    pub session: Session,
    pub user: VerifiedUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub id: Uuid,
    pub phone: Option<String>,
    pub profile: ProfileFields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
