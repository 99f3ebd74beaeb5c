// Thin client for the parts of a Supabase project used by phone verification:
// GoTrue phone OTP, PostgREST single-row reads and the admin user endpoints.

pub mod models;

use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ApiErrorBody, AuthResponse, ListUsersBody, User, VerifyResponseBody};

const PGRST_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("Request to Supabase failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Supabase returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Service role key is required for admin operations")]
    MissingServiceRoleKey,
}

#[derive(Debug, Clone)]
pub struct SupabaseOptions {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    pub url: String,
    pub anon_key: String,
    pub service_role_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SupabaseService {
    options: SupabaseOptions,
    client: Client,
}

impl SupabaseService {
    pub fn new(options: SupabaseOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.options.url.trim_end_matches('/'), path)
    }

    fn with_key(&self, builder: RequestBuilder, bearer: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.options.anon_key)
            .bearer_auth(bearer)
    }

    fn admin_key(&self) -> Result<&str, SupabaseError> {
        self.options
            .service_role_key
            .as_deref()
            .ok_or(SupabaseError::MissingServiceRoleKey)
    }

    /// Ask the auth API to text a one-time code to `phone`.
    ///
    /// Creates the identity on first use.
    pub async fn send_otp(&self, phone: &str) -> Result<(), SupabaseError> {
        let request = self
            .client
            .post(self.endpoint("/auth/v1/otp"))
            .json(&json!({ "phone": phone, "create_user": true }));

        let response = self
            .with_key(request, &self.options.anon_key)
            .send()
            .await?;

        ensure_success(response).await.map(|_| ())
    }

    /// Redeem an SMS code for a session.
    pub async fn verify_otp(&self, phone: &str, token: &str) -> Result<AuthResponse, SupabaseError> {
        let request = self
            .client
            .post(self.endpoint("/auth/v1/verify"))
            .json(&json!({ "type": "sms", "phone": phone, "token": token }));

        let response = self
            .with_key(request, &self.options.anon_key)
            .send()
            .await?;

        let body = ensure_success(response)
            .await?
            .json::<VerifyResponseBody>()
            .await?;

        Ok(body.into())
    }

    /// Select exactly one row from `table` as the holder of `access_token`.
    ///
    /// Row-level policies apply, so rows the caller cannot see are reported as
    /// `Ok(None)` just like rows that do not exist.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        columns: &str,
        access_token: &str,
    ) -> Result<Option<T>, SupabaseError> {
        let mut query: Vec<(String, String)> = filters
            .iter()
            .map(|(column, value)| (column.to_string(), format!("eq.{}", value)))
            .collect();
        query.push(("select".to_string(), columns.to_string()));

        let request = self
            .client
            .get(self.endpoint(&format!("/rest/v1/{}", table)))
            .query(&query)
            .header(header::ACCEPT, PGRST_SINGLE_OBJECT);

        let response = self.with_key(request, access_token).send().await?;

        // PostgREST answers 406 when a single-object request matches zero rows
        if response.status() == StatusCode::NOT_ACCEPTABLE {
            return Ok(None);
        }

        let row = ensure_success(response).await?.json::<T>().await?;
        Ok(Some(row))
    }

    /// List identities (service role only).
    pub async fn list_users(&self, page: u32, per_page: u32) -> Result<Vec<User>, SupabaseError> {
        let key = self.admin_key()?;
        let request = self
            .client
            .get(self.endpoint("/auth/v1/admin/users"))
            .query(&[("page", page), ("per_page", per_page)])
            .header("apikey", key)
            .bearer_auth(key);

        let body = ensure_success(request.send().await?)
            .await?
            .json::<ListUsersBody>()
            .await?;

        Ok(body.users)
    }

    /// Delete an identity (service role only). Its profile row cascades.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), SupabaseError> {
        let key = self.admin_key()?;
        let request = self
            .client
            .delete(self.endpoint(&format!("/auth/v1/admin/users/{}", user_id)))
            .header("apikey", key)
            .bearer_auth(key);

        ensure_success(request.send().await?).await.map(|_| ())
    }
}

async fn ensure_success(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .map(ApiErrorBody::into_message)
        .unwrap_or(text);

    tracing::warn!(status = status.as_u16(), %message, "Supabase request failed");

    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}
