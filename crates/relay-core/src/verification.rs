//! # Verification Types
//!
//! Provider transaction view and the relay's verify-payment result.

use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// The only provider status that counts as paid
pub const SUCCESS_STATUS: &str = "success";

/// Verify-payment request body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationRequest {
    #[serde(default)]
    pub reference: Option<String>,
}

impl VerificationRequest {
    /// The reference to verify, or a validation error if absent
    pub fn into_reference(self) -> RelayResult<String> {
        self.reference
            .filter(|r| !r.is_empty())
            .ok_or_else(|| RelayError::validation("Payment reference is required"))
    }
}

/// A transaction as reported by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub reference: String,
    /// Minor units, copied as the provider sent it (may be null)
    pub amount: serde_json::Value,
    pub currency: Option<String>,
    pub status: String,
    pub paid_at: Option<String>,
    pub channel: Option<String>,
    pub customer_email: Option<String>,
    pub metadata: serde_json::Value,
}

impl Transaction {
    pub fn is_successful(&self) -> bool {
        self.status == SUCCESS_STATUS
    }

    /// Accept the transaction only if the provider marked it successful
    pub fn into_verification(self) -> RelayResult<VerificationResult> {
        if !self.is_successful() {
            return Err(RelayError::Verification {
                status: self.status,
            });
        }

        Ok(VerificationResult {
            reference: self.reference,
            amount: self.amount,
            currency: self.currency,
            status: self.status,
            paid_at: self.paid_at,
            channel: self.channel,
            email: self.customer_email,
            metadata: self.metadata,
        })
    }
}

/// Payment data returned to the storefront after a successful verify
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub reference: String,
    pub amount: serde_json::Value,
    pub currency: Option<String>,
    pub status: String,
    pub paid_at: Option<String>,
    pub channel: Option<String>,
    pub email: Option<String>,
    pub metadata: serde_json::Value,
}
