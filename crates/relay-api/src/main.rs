//! # paystack-relay
//!
//! Keeps the Paystack secret key on the server while the storefront
//! initializes and verifies card payments.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export PAYSTACK_SECRET_KEY=sk_test_...
//! export STOREFRONT_URL=https://shop.example.com
//! export PORT=3000
//!
//! # Run the server
//! paystack-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Payment provider: {} ({})",
        state.gateway.provider_name(),
        state.gateway.mode()
    );
    info!("Allowed origins: {:?}", state.config.allowed_origins());
    info!("Callback URL: {}", state.config.callback_url());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("paystack-relay v{} listening on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Health: GET http://{}/health", addr);
        info!("Create: POST http://{}/create-payment", addr);
        info!("Verify: POST http://{}/verify-payment", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
