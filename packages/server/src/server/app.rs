//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use supabase::{SupabaseOptions, SupabaseService};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::{ServerDeps, SupabaseAdapter};
use crate::server::routes::{
    health_handler, method_not_allowed_handler, verification_start_handler,
    verification_verify_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build production dependencies from configuration
pub fn build_deps(config: &Config) -> ServerDeps {
    let supabase = Arc::new(SupabaseService::new(SupabaseOptions {
        url: config.supabase_url.clone(),
        anon_key: config.supabase_anon_key.clone(),
        service_role_key: config.supabase_service_role_key.clone(),
    }));

    ServerDeps::new(Arc::new(SupabaseAdapter::new(supabase)))
}

/// Build the Axum application router from configuration
pub fn build_app(config: &Config) -> Router {
    build_router(build_deps(config))
}

/// Build the Axum application router around the given dependencies
pub fn build_router(deps: ServerDeps) -> Router {
    let app_state = AppState {
        deps: Arc::new(deps),
    };

    // CORS configuration - any origin. The layer answers every OPTIONS request
    // itself, so the routes only need POST.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-client-info"),
        ]);

    Router::new()
        .route(
            "/verification-start",
            post(verification_start_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/verification-verify",
            post(verification_verify_handler).fallback(method_not_allowed_handler),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
