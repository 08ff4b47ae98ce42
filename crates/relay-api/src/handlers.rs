//! # Request Handlers
//!
//! Axum request handlers for the payment relay.
//! Each handler validates its input, makes at most one provider call, and
//! reshapes the provider's answer for the storefront.

use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use relay_core::{
    PaymentInitResult, PaymentRequest, RelayError, VerificationRequest, VerificationResult,
};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

pub const SERVICE_NAME: &str = "paystack-relay";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create payment response
#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    pub message: String,
    pub data: PaymentInitResult,
}

/// Verify payment response
#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "paymentData")]
    pub payment_data: VerificationResult,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    /// Provider or transport error text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Provider transaction status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: None,
            status: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Turn a relay error into a response; `context` is the message used when
/// the detail comes from the provider.
fn relay_error_to_response(err: RelayError, context: &str) -> ApiError {
    (status_for(&err), Json(error_body(err, context)))
}

/// Same as `relay_error_to_response`, except a provider `status: false`
/// answers 400 here while create-payment answers 500.
fn verify_error_to_response(err: RelayError) -> ApiError {
    let code = if err.is_rejection() {
        StatusCode::BAD_REQUEST
    } else {
        status_for(&err)
    };
    (code, Json(error_body(err, "Payment verification failed")))
}

fn status_for(err: &RelayError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

fn error_body(err: RelayError, context: &str) -> ErrorResponse {
    match err {
        RelayError::Validation(message) => ErrorResponse::new(message),
        RelayError::Verification { ref status } => {
            ErrorResponse::new(err.to_string()).with_status(status.clone())
        }
        RelayError::Gateway { message, .. } => ErrorResponse::new(context).with_error(message),
        RelayError::Configuration(message) => ErrorResponse::new(context).with_error(message),
    }
}

fn json_rejection(rejection: JsonRejection) -> RelayError {
    RelayError::validation(format!("Invalid JSON body: {}", rejection.body_text()))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "OK",
        "service": SERVICE_NAME,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "paystackMode": state.gateway.mode(),
    }))
}

/// Confirm the provider credential and network path with one cheap read
#[instrument(skip(state))]
pub async fn test_paystack(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("[test-paystack] Checking {} connection", state.gateway.provider_name());

    state.gateway.ping().await.map_err(|e| {
        error!("[test-paystack] Connection failed: {}", e);
        let (_, body) = relay_error_to_response(e, "Paystack connection failed");
        (StatusCode::INTERNAL_SERVER_ERROR, body)
    })?;

    info!("[test-paystack] Connection OK");

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Paystack connection successful",
        "mode": state.gateway.mode(),
    })))
}

/// Initialize a payment and hand back the hosted payment page
#[instrument(skip(state, payload))]
pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    let context = "Payment initialization failed";

    let Json(request) = payload.map_err(|e| {
        warn!("[create-payment] Rejected body: {}", e);
        relay_error_to_response(json_rejection(e), context)
    })?;

    let transaction = request.validate(&state.config.callback_url()).map_err(|e| {
        warn!("[create-payment] Validation failed: {}", e);
        relay_error_to_response(e, context)
    })?;

    info!(
        "[create-payment] order={}, amount={} {}, items={}",
        transaction.reference,
        transaction.amount,
        transaction.currency,
        transaction.metadata.items_count
    );

    let init = state.gateway.initialize(&transaction).await.map_err(|e| {
        error!("[create-payment] Gateway error for {}: {}", transaction.reference, e);
        relay_error_to_response(e, context)
    })?;

    info!("[create-payment] Initialized reference={}", init.reference);

    Ok(Json(CreatePaymentResponse {
        success: true,
        message: "Payment initialized successfully".to_string(),
        data: init,
    }))
}

/// Verify a payment by reference
#[instrument(skip(state, payload))]
pub async fn verify_payment(
    State(state): State<AppState>,
    payload: Result<Json<VerificationRequest>, JsonRejection>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| {
        warn!("[verify-payment] Rejected body: {}", e);
        verify_error_to_response(json_rejection(e))
    })?;

    let reference = request.into_reference().map_err(|e| {
        warn!("[verify-payment] Validation failed: {}", e);
        verify_error_to_response(e)
    })?;

    info!("[verify-payment] reference={}", reference);

    let transaction = state.gateway.verify(&reference).await.map_err(|e| {
        error!("[verify-payment] Gateway error for {}: {}", reference, e);
        verify_error_to_response(e)
    })?;

    let payment_data = transaction.into_verification().map_err(|e| {
        warn!("[verify-payment] {} not paid: {}", reference, e);
        verify_error_to_response(e)
    })?;

    info!(
        "[verify-payment] Verified reference={}, amount={} {}",
        payment_data.reference,
        payment_data.amount,
        payment_data.currency.as_deref().unwrap_or("-")
    );

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
        payment_data,
    }))
}

/// Fallback for every unmatched method/path
pub async fn not_found() -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error").with_error("detail");
        assert!(!err.success);
        assert_eq!(err.message, "Test error");
        assert_eq!(err.error.as_deref(), Some("detail"));
        assert!(err.status.is_none());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err = RelayError::validation("Missing required fields: email");
        let (status, Json(body)) = relay_error_to_response(err, "ctx");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Missing required fields: email");
        assert!(body.error.is_none());
    }

    #[test]
    fn test_rejection_status_differs_by_endpoint() {
        let (create, Json(body)) =
            relay_error_to_response(RelayError::rejected("Invalid key"), "ctx");
        assert_eq!(create, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "ctx");
        assert_eq!(body.error.as_deref(), Some("Invalid key"));

        let (verify, _) = verify_error_to_response(RelayError::rejected("Invalid key"));
        assert_eq!(verify, StatusCode::BAD_REQUEST);

        let (unavailable, _) = verify_error_to_response(RelayError::unavailable("timeout"));
        assert_eq!(unavailable, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_verification_error_carries_status() {
        let (status, Json(body)) = verify_error_to_response(RelayError::Verification {
            status: "abandoned".into(),
        });
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.status.as_deref(), Some("abandoned"));
        assert_eq!(body.message, "Payment not successful. Status: abandoned");
    }
}
