//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the injected payment gateway and the relay configuration; nothing
//! in here changes after startup.

use relay_core::BoxedPaymentGateway;
use relay_paystack::PaystackGateway;
use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Production storefront origin (also the callback host)
    pub storefront_url: String,
    /// Local development origin
    pub dev_origin: String,
    /// Storefront route the provider redirects to after payment
    pub callback_path: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            host: var("HOST", "0.0.0.0"),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            storefront_url: var("STOREFRONT_URL", "https://shop.example.com"),
            dev_origin: var("DEV_ORIGIN", "http://localhost:5173"),
            callback_path: var("CALLBACK_PATH", "/payment/callback"),
            environment: var("ENVIRONMENT", "development"),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Where the provider sends the buyer once payment completes
    pub fn callback_url(&self) -> String {
        format!(
            "{}/{}",
            self.storefront_url.trim_end_matches('/'),
            self.callback_path.trim_start_matches('/')
        )
    }

    /// Origins allowed to call the relay from a browser
    pub fn allowed_origins(&self) -> [&str; 2] {
        [
            self.storefront_url.trim_end_matches('/'),
            self.dev_origin.trim_end_matches('/'),
        ]
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payment provider
    pub gateway: BoxedPaymentGateway,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Paystack
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let gateway = PaystackGateway::from_env()?;

        if !gateway.config().is_configured() {
            tracing::warn!("PAYSTACK_SECRET_KEY is not set; Paystack calls will fail");
        }

        Ok(Self::with_gateway(config, Arc::new(gateway)))
    }

    /// Create an AppState around an existing gateway
    pub fn with_gateway(config: AppConfig, gateway: BoxedPaymentGateway) -> Self {
        Self { gateway, config }
    }
}
