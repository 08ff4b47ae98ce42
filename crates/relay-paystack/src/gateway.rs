//! # Paystack Gateway
//!
//! `PaymentGateway` implementation over the Paystack REST API.
//! Three endpoints are used: list transactions (diagnostics), initialize,
//! and verify by reference. Calls are made once; nothing is retried.

use crate::config::PaystackConfig;
use async_trait::async_trait;
use relay_core::{
    InitializeTransaction, KeyMode, PaymentGateway, PaymentInitResult, RelayError, RelayResult,
    Transaction,
};
use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "paystack";

/// Paystack-backed payment gateway
pub struct PaystackGateway {
    config: PaystackConfig,
    base_url: Url,
    client: Client,
}

impl PaystackGateway {
    /// Create a new Paystack gateway
    pub fn new(config: PaystackConfig) -> RelayResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            RelayError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        let base_url = Url::parse(&config.api_base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                RelayError::Configuration(format!(
                    "Invalid Paystack base URL: {}",
                    config.api_base_url
                ))
            })?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Self::new(PaystackConfig::from_env())
    }

    pub fn config(&self) -> &PaystackConfig {
        &self.config
    }

    /// Build an API URL from path segments, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL can always take path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send an authenticated request and return the body of a 2xx reply
    async fn execute(&self, request: RequestBuilder) -> RelayResult<String> {
        let auth = self.config.auth_header().ok_or_else(|| {
            error!("Paystack call attempted without PAYSTACK_SECRET_KEY");
            RelayError::unavailable("Paystack secret key is not configured")
        })?;

        let response = request
            .header(AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| {
                error!("Paystack request failed: {}", e);
                RelayError::unavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::unavailable(e.to_string()))?;

        if !status.is_success() {
            error!("Paystack API error: status={}, body={}", status, body);

            let message = serde_json::from_str::<PaystackErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

            return Err(RelayError::unavailable(message));
        }

        Ok(body)
    }

    /// Send a request and unwrap Paystack's `{status, message, data}` envelope
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RelayResult<T> {
        let body = self.execute(request).await?;

        let envelope: PaystackResponse = serde_json::from_str(&body).map_err(|e| {
            RelayError::unavailable(format!("Invalid Paystack response: {}", e))
        })?;

        // Anything but an explicit `status: true` is a rejection.
        if envelope.status != Some(true) {
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Paystack request was not successful".to_string());
            error!("Paystack rejected request: {}", message);
            return Err(RelayError::rejected(message));
        }

        let data = envelope
            .data
            .ok_or_else(|| RelayError::unavailable("Paystack response has no data"))?;

        serde_json::from_value(data)
            .map_err(|e| RelayError::unavailable(format!("Invalid Paystack response: {}", e)))
    }
}

#[async_trait]
impl PaymentGateway for PaystackGateway {
    #[instrument(skip(self))]
    async fn ping(&self) -> RelayResult<()> {
        let mut url = self.endpoint(&["transaction"]);
        url.query_pairs_mut().append_pair("perPage", "1");

        self.execute(self.client.get(url)).await?;
        debug!("Paystack list-transactions call succeeded");
        Ok(())
    }

    #[instrument(skip(self, transaction), fields(reference = %transaction.reference))]
    async fn initialize(
        &self,
        transaction: &InitializeTransaction,
    ) -> RelayResult<PaymentInitResult> {
        info!(
            "Initializing Paystack transaction: amount={} {}, email={}",
            transaction.amount, transaction.currency, transaction.email
        );

        let url = self.endpoint(&["transaction", "initialize"]);
        let init: PaymentInitResult = self.send(self.client.post(url).json(transaction)).await?;

        info!(
            "Paystack transaction initialized: reference={}, access_code={}",
            init.reference, init.access_code
        );
        Ok(init)
    }

    #[instrument(skip(self))]
    async fn verify(&self, reference: &str) -> RelayResult<Transaction> {
        info!("Verifying Paystack transaction: reference={}", reference);

        let url = self.endpoint(&["transaction", "verify", reference]);
        let tx: PaystackTransaction = self.send(self.client.get(url)).await?;
        let tx = tx.into_transaction(reference);

        info!(
            "Paystack transaction fetched: reference={}, status={}",
            tx.reference, tx.status
        );
        Ok(tx)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }

    fn mode(&self) -> KeyMode {
        self.config.mode()
    }
}

// =============================================================================
// Paystack API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct PaystackResponse {
    #[serde(default)]
    status: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PaystackErrorBody {
    #[serde(default)]
    message: Option<String>,
}

// Only `status` decides the outcome; every other field may be absent or null.
#[derive(Debug, Deserialize)]
struct PaystackTransaction {
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    amount: serde_json::Value,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default, alias = "paidAt")]
    paid_at: Option<String>,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    customer: Option<PaystackCustomer>,
    #[serde(default)]
    metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct PaystackCustomer {
    #[serde(default)]
    email: Option<String>,
}

impl PaystackTransaction {
    /// Falls back to the requested reference when the provider omits it
    fn into_transaction(self, requested: &str) -> Transaction {
        Transaction {
            reference: self.reference.unwrap_or_else(|| requested.to_string()),
            amount: self.amount,
            currency: self.currency,
            status: self.status.unwrap_or_default(),
            paid_at: self.paid_at,
            channel: self.channel,
            customer_email: self.customer.and_then(|c| c.email),
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::{GatewayFailure, PaymentRequest};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "sk_test_abc123";

    fn gateway(server: &MockServer) -> PaystackGateway {
        let config = PaystackConfig::new(KEY).with_api_base_url(server.uri());
        PaystackGateway::new(config).unwrap()
    }

    fn payload() -> InitializeTransaction {
        let request: PaymentRequest = serde_json::from_value(json!({
            "orderId": "ORD-42",
            "amount": 2500.75,
            "email": "buyer@example.com",
        }))
        .unwrap();
        request
            .validate("https://shop.example.com/payment/callback")
            .unwrap()
    }

    fn failure(err: RelayError) -> (GatewayFailure, String) {
        match err {
            RelayError::Gateway { failure, message } => (failure, message),
            other => panic!("expected gateway error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let config = PaystackConfig::new(KEY).with_api_base_url("not a url");
        assert!(matches!(
            PaystackGateway::new(config),
            Err(RelayError::Configuration(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_reference() {
        let config = PaystackConfig::new(KEY).with_api_base_url("https://api.paystack.co");
        let gateway = PaystackGateway::new(config).unwrap();
        let url = gateway.endpoint(&["transaction", "verify", "ORD 1/2"]);
        assert_eq!(
            url.as_str(),
            "https://api.paystack.co/transaction/verify/ORD%201%2F2"
        );
    }

    #[tokio::test]
    async fn test_initialize_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .and(header("authorization", "Bearer sk_test_abc123"))
            .and(body_partial_json(json!({
                "email": "buyer@example.com",
                "amount": 250075,
                "currency": "NGN",
                "reference": "ORD-42",
                "callback_url": "https://shop.example.com/payment/callback",
                "metadata": { "order_id": "ORD-42", "customer_name": "Customer" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Authorization URL created",
                "data": {
                    "authorization_url": "https://checkout.paystack.com/abc",
                    "access_code": "abc",
                    "reference": "ORD-42"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let init = gateway(&server).initialize(&payload()).await.unwrap();
        assert_eq!(init.authorization_url, "https://checkout.paystack.com/abc");
        assert_eq!(init.access_code, "abc");
        assert_eq!(init.reference, "ORD-42");
    }

    #[tokio::test]
    async fn test_initialize_status_false_is_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": false,
                "message": "Duplicate Transaction Reference"
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).initialize(&payload()).await.unwrap_err();
        let (failure, message) = failure(err);
        assert_eq!(failure, GatewayFailure::Rejected);
        assert_eq!(message, "Duplicate Transaction Reference");
    }

    #[tokio::test]
    async fn test_http_error_uses_provider_message() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/transaction/initialize"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": false,
                "message": "Invalid key"
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).initialize(&payload()).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        let (failure, message) = failure(err);
        assert_eq!(failure, GatewayFailure::Unavailable);
        assert_eq!(message, "Invalid key");
    }

    #[tokio::test]
    async fn test_http_error_without_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-42"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let err = gateway(&server).verify("ORD-42").await.unwrap_err();
        let (failure, message) = failure(err);
        assert_eq!(failure, GatewayFailure::Unavailable);
        assert_eq!(message, "Request failed with status code 502");
    }

    #[tokio::test]
    async fn test_verify_maps_transaction() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-42"))
            .and(header("authorization", "Bearer sk_test_abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "id": 1234,
                    "reference": "ORD-42",
                    "amount": 250075,
                    "currency": "NGN",
                    "status": "success",
                    "paid_at": "2024-05-01T10:00:00.000Z",
                    "channel": "card",
                    "customer": { "id": 9, "email": "buyer@example.com" },
                    "metadata": { "order_id": "ORD-42" }
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tx = gateway(&server).verify("ORD-42").await.unwrap();
        assert_eq!(tx.reference, "ORD-42");
        assert_eq!(tx.amount, json!(250_075));
        assert_eq!(tx.currency.as_deref(), Some("NGN"));
        assert_eq!(tx.status, "success");
        assert_eq!(tx.channel.as_deref(), Some("card"));
        assert_eq!(tx.customer_email.as_deref(), Some("buyer@example.com"));
        assert_eq!(tx.metadata["order_id"], "ORD-42");
    }

    #[tokio::test]
    async fn test_verify_status_false_is_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-404"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": false,
                "message": "Transaction reference not found",
                "data": {}
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).verify("ORD-404").await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Transaction reference not found");
    }

    #[tokio::test]
    async fn test_verify_tolerates_null_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Verification successful",
                "data": {
                    "reference": null,
                    "amount": 100,
                    "currency": null,
                    "status": "abandoned",
                    "paid_at": null,
                    "channel": null,
                    "customer": null,
                    "metadata": null
                }
            })))
            .mount(&server)
            .await;

        let tx = gateway(&server).verify("ORD-2").await.unwrap();
        assert_eq!(tx.reference, "ORD-2");
        assert_eq!(tx.status, "abandoned");
        assert!(tx.currency.is_none());
        assert!(tx.customer_email.is_none());

        match tx.into_verification() {
            Err(RelayError::Verification { status }) => assert_eq!(status, "abandoned"),
            other => panic!("expected verification error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_envelope_without_status_is_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "weird" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": null,
                "message": null
            })))
            .mount(&server)
            .await;

        let gateway = gateway(&server);

        let err = gateway.verify("ORD-3").await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "weird");

        let err = gateway.verify("ORD-4").await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.to_string(), "Paystack request was not successful");
    }

    #[tokio::test]
    async fn test_timeout_bounds_call() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction/verify/ORD-5"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": true, "data": {} }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let uri = server.uri();
        let config = PaystackConfig::from_lookup(|key| match key {
            "PAYSTACK_SECRET_KEY" => Some(KEY.to_string()),
            "PAYSTACK_BASE_URL" => Some(uri.clone()),
            "PAYSTACK_TIMEOUT_SECS" => Some("1".to_string()),
            _ => None,
        });
        let gateway = PaystackGateway::new(config).unwrap();

        let err = gateway.verify("ORD-5").await.unwrap_err();
        let (failure, _) = failure(err);
        assert_eq!(failure, GatewayFailure::Unavailable);
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/transaction"))
            .and(query_param("perPage", "1"))
            .and(header("authorization", "Bearer sk_test_abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": true,
                "message": "Transactions retrieved",
                "data": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        gateway(&server).ping().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_key_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = PaystackConfig::from_lookup(|_| None).with_api_base_url(server.uri());
        let gateway = PaystackGateway::new(config).unwrap();
        assert_eq!(gateway.mode(), KeyMode::NotConfigured);

        let err = gateway.ping().await.unwrap_err();
        assert_eq!(err.to_string(), "Paystack secret key is not configured");
    }

    #[tokio::test]
    async fn test_transport_error() {
        let config = PaystackConfig::new(KEY).with_api_base_url("http://127.0.0.1:1");
        let gateway = PaystackGateway::new(config).unwrap();

        let err = gateway.verify("ORD-42").await.unwrap_err();
        let (failure, message) = failure(err);
        assert_eq!(failure, GatewayFailure::Unavailable);
        assert!(!message.is_empty());
    }
}
