//! # relay-core
//!
//! Core types and traits for the paystack-relay payment relay.
//!
//! This crate provides:
//! - `PaymentRequest` validation and the `InitializeTransaction` payload
//! - `Transaction` and `VerificationResult` for the verify flow
//! - `KeyMode` derived from the provider secret
//! - `PaymentGateway` trait for provider implementations
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{PaymentGateway, PaymentRequest};
//!
//! let payload = request.validate("https://shop.example.com/payment/callback")?;
//! let init = gateway.initialize(&payload).await?;
//!
//! // Redirect the buyer to init.authorization_url
//! ```

pub mod error;
pub mod gateway;
pub mod mode;
pub mod payment;
pub mod verification;

// Re-exports for convenience
pub use error::{GatewayFailure, RelayError, RelayResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use mode::{KeyMode, LIVE_KEY_PREFIX};
pub use payment::{
    to_minor_units, CustomField, InitializeTransaction, PaymentInitResult, PaymentRequest,
    TransactionMetadata, CURRENCY, MINIMUM_AMOUNT,
};
pub use verification::{Transaction, VerificationRequest, VerificationResult, SUCCESS_STATUS};
