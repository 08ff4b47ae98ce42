//! # Routes
//!
//! Axum router configuration for the payment relay.

use crate::handlers;
use crate::state::{AppConfig, AppState};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, MethodRouter},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

/// Create the main application router
///
/// Routes:
/// - GET  /health - Service identity and credential mode
/// - GET  /test-paystack - Provider connectivity check
/// - POST /create-payment - Initialize a payment
/// - POST /verify-payment - Verify a payment by reference
///
/// Each path also answers with a single trailing slash. Anything else,
/// including a wrong method on a known path, gets the 404 fallback.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    let router = Router::new();
    let router = route(router, "/health", get(handlers::health));
    let router = route(router, "/test-paystack", get(handlers::test_paystack));
    let router = route(router, "/create-payment", post(handlers::create_payment));
    let router = route(router, "/verify-payment", post(handlers::verify_payment));

    router
        .fallback(handlers::not_found)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}

/// Register `handler` at `path` and `path/`
fn route(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    let handler = handler.fallback(handlers::not_found);
    router
        .route(&format!("{}/", path), handler.clone())
        .route(path, handler)
}

/// CORS restricted to the storefront and the local dev origin, with credentials
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
