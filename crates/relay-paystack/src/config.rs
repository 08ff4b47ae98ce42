//! # Paystack Configuration
//!
//! Configuration for the Paystack integration.
//! The secret key is loaded from the environment and never leaves the server.

use relay_core::KeyMode;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.paystack.co";

/// Paystack API configuration
#[derive(Clone)]
pub struct PaystackConfig {
    /// Secret API key (sk_test_... or sk_live_...), absent if not configured
    pub secret_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// Outbound request timeout; `None` leaves reqwest's default (no timeout)
    pub timeout: Option<Duration>,
}

impl PaystackConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognised env vars:
    /// - `PAYSTACK_SECRET_KEY` (a missing key is not an error)
    /// - `PAYSTACK_BASE_URL`
    /// - `PAYSTACK_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let secret_key = lookup("PAYSTACK_SECRET_KEY").filter(|k| !k.trim().is_empty());

        let api_base_url = lookup("PAYSTACK_BASE_URL")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout = lookup("PAYSTACK_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            secret_key,
            api_base_url,
            timeout,
        }
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    pub fn mode(&self) -> KeyMode {
        KeyMode::from_secret(self.secret_key.as_deref())
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> Option<String> {
        self.secret_key
            .as_ref()
            .map(|key| format!("Bearer {}", key))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl Default for PaystackConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for PaystackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackConfig")
            .field("mode", &self.mode())
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
