use axum::{
    extract::{rejection::JsonRejection, Extension},
    Json,
};

use crate::domains::verification::types::{
    StartVerificationRequest, StartVerificationResponse, VerifyCodeRequest, VerifyCodeResponse,
};
use crate::domains::verification::{start_verification, verify_code, VerificationError};
use crate::server::app::AppState;

/// POST /verification-start
pub async fn verification_start_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<StartVerificationRequest>, JsonRejection>,
) -> Result<Json<StartVerificationResponse>, VerificationError> {
    let Json(request) = payload.map_err(malformed)?;
    start_verification(request, &state.deps).await.map(Json)
}

/// POST /verification-verify
pub async fn verification_verify_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<VerifyCodeRequest>, JsonRejection>,
) -> Result<Json<VerifyCodeResponse>, VerificationError> {
    let Json(request) = payload.map_err(malformed)?;
    verify_code(request, &state.deps).await.map(Json)
}

/// Any method other than POST (OPTIONS never gets here)
pub async fn method_not_allowed_handler() -> VerificationError {
    VerificationError::MethodNotAllowed
}

fn malformed(rejection: JsonRejection) -> VerificationError {
    VerificationError::MalformedRequest(rejection.body_text())
}
