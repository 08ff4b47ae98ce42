//! Credential mode derived from the provider secret key.

use serde::Serialize;
use std::fmt;

/// Prefix of provider secret keys that charge real cards
pub const LIVE_KEY_PREFIX: &str = "sk_live_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyMode {
    Live,
    Test,
    NotConfigured,
}

impl KeyMode {
    pub fn from_secret(secret: Option<&str>) -> Self {
        match secret {
            None | Some("") => KeyMode::NotConfigured,
            Some(key) if key.starts_with(LIVE_KEY_PREFIX) => KeyMode::Live,
            Some(_) => KeyMode::Test,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyMode::Live => "LIVE",
            KeyMode::Test => "TEST",
            KeyMode::NotConfigured => "NOT_CONFIGURED",
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
