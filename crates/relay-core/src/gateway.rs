//! # Payment Gateway Trait
//!
//! The seam between the HTTP layer and a concrete payment provider.
//! Handlers hold a `BoxedPaymentGateway` injected at startup, so tests can
//! swap the provider for a stub.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │        PaymentGateway (trait)            │
//! │  ├── ping()        list 1 transaction    │
//! │  ├── initialize()  start a transaction   │
//! │  └── verify()      look up by reference  │
//! └──────────────────────────────────────────┘
//!                     ▲
//!             ┌───────┴───────┐
//!             │PaystackGateway│
//!             └───────────────┘
//! ```

use crate::error::RelayResult;
use crate::mode::KeyMode;
use crate::payment::{InitializeTransaction, PaymentInitResult};
use crate::verification::Transaction;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Cheapest authenticated read the provider offers.
    ///
    /// Succeeds on any 2xx reply; used to confirm the credential and the
    /// network path.
    async fn ping(&self) -> RelayResult<()>;

    /// Initialize a transaction and return the hosted payment page details.
    async fn initialize(&self, transaction: &InitializeTransaction)
        -> RelayResult<PaymentInitResult>;

    /// Fetch a transaction by its reference.
    async fn verify(&self, reference: &str) -> RelayResult<Transaction>;

    /// Provider name (for logging).
    fn provider_name(&self) -> &'static str;

    /// Mode of the configured credential.
    fn mode(&self) -> KeyMode;
}

/// Type alias for a shared payment gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;
