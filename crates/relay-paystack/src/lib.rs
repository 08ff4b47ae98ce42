//! # relay-paystack
//!
//! Paystack gateway for paystack-relay.
//!
//! `PaystackGateway` implements `relay_core::PaymentGateway` against the
//! Paystack REST API using a server-held secret key:
//!
//! | Operation | Paystack endpoint |
//! |-----------|-------------------|
//! | `ping` | `GET /transaction?perPage=1` |
//! | `initialize` | `POST /transaction/initialize` |
//! | `verify` | `GET /transaction/verify/{reference}` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_paystack::PaystackGateway;
//! use relay_core::PaymentGateway;
//!
//! // Create gateway from environment
//! let gateway = PaystackGateway::from_env()?;
//!
//! let init = gateway.initialize(&payload).await?;
//! // Redirect the buyer to init.authorization_url
//!
//! let tx = gateway.verify(&init.reference).await?;
//! ```

pub mod config;
pub mod gateway;

// Re-exports
pub use config::{PaystackConfig, DEFAULT_API_BASE_URL};
pub use gateway::PaystackGateway;
