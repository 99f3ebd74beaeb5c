use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tokens issued by the auth API after a successful OTP redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    pub token_type: String,
}

/// Identity record as returned by the auth API.
///
/// The auth API stores phone numbers without the leading `+`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Outcome of a successful `/verify` call. Either half may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthResponse {
    pub session: Option<Session>,
    pub user: Option<User>,
}

/// Raw `/verify` body: session fields are flattened next to `user`.
#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponseBody {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
    pub token_type: Option<String>,
    pub user: Option<User>,
}

impl From<VerifyResponseBody> for AuthResponse {
    fn from(body: VerifyResponseBody) -> Self {
        let session = match (body.access_token, body.refresh_token) {
            (Some(access_token), Some(refresh_token)) => Some(Session {
                access_token,
                refresh_token,
                expires_in: body.expires_in.unwrap_or_default(),
                expires_at: body.expires_at,
                token_type: body.token_type.unwrap_or_else(|| "bearer".to_string()),
            }),
            _ => None,
        };

        Self {
            session,
            user: body.user,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListUsersBody {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Error payloads differ between the auth API and PostgREST.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub msg: Option<String>,
    pub message: Option<String>,
    pub error_description: Option<String>,
    pub error: Option<String>,
}

impl ApiErrorBody {
    pub fn into_message(self) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .or(self.error)
            .unwrap_or_else(|| "unknown error".to_string())
    }
}
