//! # relay-api
//!
//! HTTP API layer for paystack-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Create/verify payment endpoints backed by an injected `PaymentGateway`
//! - Health and provider connectivity checks
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Service identity and credential mode |
//! | GET | `/test-paystack` | List one transaction to confirm the key works |
//! | POST | `/create-payment` | Initialize a payment |
//! | POST | `/verify-payment` | Verify a payment by reference |
//! | * | anything else | 404 `Endpoint not found` |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
