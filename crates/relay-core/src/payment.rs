//! # Payment Initialization Types
//!
//! The create-payment request as the storefront sends it, and the
//! transaction payload the relay forwards to the provider.

use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// Currency every transaction is charged in
pub const CURRENCY: &str = "NGN";

/// Smallest amount (major units) the relay will forward
pub const MINIMUM_AMOUNT: f64 = 100.0;

pub const DEFAULT_CUSTOMER_NAME: &str = "Customer";
pub const DEFAULT_CUSTOMER_PHONE: &str = "Not provided";

/// Create-payment request body from the storefront
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Storefront order id, used verbatim as the transaction reference
    #[serde(default)]
    pub order_id: Option<String>,
    /// Amount in major units (naira), number or numeric string
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Only the count is used; anything but an array counts as zero
    #[serde(default)]
    pub items: Option<serde_json::Value>,
    /// Accepted for compatibility, not forwarded
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl PaymentRequest {
    /// Names of required fields that are absent or empty, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(self.order_id.as_deref()) {
            missing.push("orderId");
        }
        if amount_is_missing(self.amount.as_ref()) {
            missing.push("amount");
        }
        if is_blank(self.email.as_deref()) {
            missing.push("email");
        }
        missing
    }

    pub fn item_count(&self) -> usize {
        match &self.items {
            Some(serde_json::Value::Array(items)) => items.len(),
            _ => 0,
        }
    }

    /// Validate the request and build the provider payload.
    ///
    /// Required fields are checked before the amount floor, so a request
    /// missing everything reports the missing fields rather than the amount.
    pub fn validate(self, callback_url: &str) -> RelayResult<InitializeTransaction> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(RelayError::validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let amount = self
            .amount
            .as_ref()
            .and_then(parse_amount)
            .ok_or_else(|| RelayError::validation("Amount must be a number"))?;

        if amount < MINIMUM_AMOUNT {
            return Err(RelayError::validation(format!(
                "Amount must be at least {}",
                MINIMUM_AMOUNT
            )));
        }

        let items_count = self.item_count();
        let order_id = self.order_id.unwrap_or_default();
        let metadata = TransactionMetadata::new(
            &order_id,
            self.customer_name.as_deref(),
            self.customer_phone.as_deref(),
            items_count,
        );

        Ok(InitializeTransaction {
            email: self.email.unwrap_or_default(),
            amount: to_minor_units(amount),
            currency: CURRENCY.to_string(),
            reference: order_id,
            callback_url: callback_url.to_string(),
            metadata,
        })
    }
}

/// Convert a major-unit amount to minor units (kobo), rounding to nearest
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

// Zero counts as absent, same as an empty string.
fn amount_is_missing(value: Option<&serde_json::Value>) -> bool {
    match value {
        None | Some(serde_json::Value::Null) => true,
        Some(serde_json::Value::String(s)) => s.is_empty(),
        Some(serde_json::Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

fn parse_amount(value: &serde_json::Value) -> Option<f64> {
    let amount = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.filter(|a| a.is_finite())
}

/// Transaction payload sent to the provider's initialize endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitializeTransaction {
    pub email: String,
    /// Minor units
    pub amount: i64,
    pub currency: String,
    pub reference: String,
    pub callback_url: String,
    pub metadata: TransactionMetadata,
}

/// Metadata block attached to every initialized transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionMetadata {
    pub order_id: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub items_count: usize,
    /// Shown on the provider dashboard
    pub custom_fields: Vec<CustomField>,
}

impl TransactionMetadata {
    pub fn new(
        order_id: &str,
        customer_name: Option<&str>,
        customer_phone: Option<&str>,
        items_count: usize,
    ) -> Self {
        let customer_name = customer_name
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_NAME)
            .to_string();
        let customer_phone = customer_phone
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CUSTOMER_PHONE)
            .to_string();

        let custom_fields = vec![
            CustomField::new("Order ID", "order_id", order_id),
            CustomField::new("Customer Name", "customer_name", customer_name.as_str()),
            CustomField::new("Customer Phone", "customer_phone", customer_phone.as_str()),
            CustomField::new("Items Count", "items_count", items_count),
        ];

        Self {
            order_id: order_id.to_string(),
            customer_name,
            customer_phone,
            items_count,
            custom_fields,
        }
    }
}

/// A display field in the provider's metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: serde_json::Value,
}

impl CustomField {
    pub fn new(
        display_name: impl Into<String>,
        variable_name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            variable_name: variable_name.into(),
            value: value.into(),
        }
    }
}

/// What the provider hands back for an initialized transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInitResult {
    pub authorization_url: String,
    pub access_code: String,
    pub reference: String,
}
