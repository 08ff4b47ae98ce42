//! # Relay Error Types
//!
//! Typed error handling for the payment relay.
//! Every relay operation returns `Result<T, RelayError>`.

use thiserror::Error;

/// How a call to the payment provider went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayFailure {
    /// Provider answered 2xx but with `status: false`
    Rejected,
    /// Transport error, non-2xx reply, or a body we could not read
    Unavailable,
}

/// Core error type for all relay operations
#[derive(Debug, Clone, Error)]
pub enum RelayError {
    /// Caller input is missing or malformed
    #[error("{0}")]
    Validation(String),

    /// Provider rejected the operation or the call itself failed
    #[error("{message}")]
    Gateway {
        failure: GatewayFailure,
        message: String,
    },

    /// Provider call succeeded but the transaction did not
    #[error("Payment not successful. Status: {status}")]
    Verification { status: String },

    /// Relay misconfiguration (bad base URL, HTTP client construction)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        RelayError::Validation(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        RelayError::Gateway {
            failure: GatewayFailure::Rejected,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        RelayError::Gateway {
            failure: GatewayFailure::Unavailable,
            message: message.into(),
        }
    }

    /// Returns true if the provider itself said no
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            RelayError::Gateway {
                failure: GatewayFailure::Rejected,
                ..
            }
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) => 400,
            RelayError::Gateway { .. } => 500,
            RelayError::Verification { .. } => 400,
            RelayError::Configuration(_) => 500,
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(RelayError::validation("missing").status_code(), 400);
        assert_eq!(RelayError::rejected("nope").status_code(), 500);
        assert_eq!(RelayError::unavailable("timeout").status_code(), 500);
        assert_eq!(
            RelayError::Verification {
                status: "failed".into()
            }
            .status_code(),
            400
        );
    }

    #[test]
    fn test_rejection_detection() {
        assert!(RelayError::rejected("Invalid key").is_rejection());
        assert!(!RelayError::unavailable("dns").is_rejection());
        assert!(!RelayError::validation("bad").is_rejection());
    }

    #[test]
    fn test_verification_message() {
        let err = RelayError::Verification {
            status: "abandoned".into(),
        };
        assert_eq!(err.to_string(), "Payment not successful. Status: abandoned");
    }
}
