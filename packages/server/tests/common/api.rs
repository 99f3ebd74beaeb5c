//! HTTP client for integration testing.
//!
//! Drives the real router in-process with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use phone_verify::kernel::ServerDeps;
use phone_verify::server::build_router;
use serde_json::Value;
use tower::ServiceExt;

/// Client for executing requests against the router in tests.
pub struct ApiClient {
    router: Router,
}

/// Result of a request.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, a JSON string for plain-text bodies, `Null` when empty.
    pub body: Value,
}

impl ApiResponse {
    /// The `error` field of an error body.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl ApiClient {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            router: build_router(deps),
        }
    }

    /// Send a request with an optional raw body and extra headers.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        headers: &[(&str, &str)],
    ) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("request should build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        ApiResponse {
            status,
            headers,
            body,
        }
    }

    /// POST a JSON body.
    pub async fn post_json(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(
            Method::POST,
            uri,
            Some(body.to_string()),
            &[("content-type", "application/json")],
        )
        .await
    }

    pub async fn start(&self, phone_number: &str) -> ApiResponse {
        self.post_json(
            "/verification-start",
            serde_json::json!({ "phone_number": phone_number }),
        )
        .await
    }

    pub async fn verify(&self, phone_number: &str, code: &str) -> ApiResponse {
        self.post_json(
            "/verification-verify",
            serde_json::json!({ "phone_number": phone_number, "verification_code": code }),
        )
        .await
    }
}
