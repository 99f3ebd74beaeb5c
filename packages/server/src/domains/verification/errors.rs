use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::ErrorResponse;

/// Every way a verification request can fail.
///
/// `Display` is the text returned to the caller; provider details travel in
/// `#[source]` and only reach the logs.
#[derive(Error, Debug)]
pub enum VerificationError {
    #[error("{0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid verification code")]
    InvalidVerificationCode,

    #[error("Failed to send verification code. Please try again.")]
    SendFailed(#[source] anyhow::Error),

    #[error("Invalid verification code")]
    CodeRejected(#[source] anyhow::Error),

    #[error("Verification succeeded but no session was returned")]
    MissingSession,

    #[error("Verification succeeded but no user was returned")]
    MissingUser,

    #[error("Internal server error")]
    MalformedRequest(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl VerificationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidPhoneNumber(_) | Self::InvalidVerificationCode | Self::CodeRejected(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SendFailed(_)
            | Self::MissingSession
            | Self::MissingUser
            | Self::MalformedRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for VerificationError {
    fn into_response(self) -> Response {
        match &self {
            Self::SendFailed(source) => {
                tracing::error!(error = %source, "Failed to send verification code");
            }
            Self::CodeRejected(source) => {
                tracing::warn!(error = %source, "Verification code rejected");
            }
            Self::MissingSession | Self::MissingUser => {
                tracing::error!(error = %self, "Identity provider response incomplete");
            }
            Self::MalformedRequest(detail) => {
                tracing::error!(error = %detail, "Malformed request body");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
