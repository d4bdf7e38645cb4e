//! Payment gateway collaborator.
//!
//! Handlers talk to the gateway only through [`PaymentGateway`], which is
//! stored in `AppState` as a trait object. Production uses
//! [`razorpay::RazorpayClient`]; tests inject an in-memory double.

pub mod razorpay;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Failure talking to the payment gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request failed (network, DNS, timeout, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("Gateway returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of a create-order call.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    /// `1` captures automatically once the payer authorizes.
    pub payment_capture: u8,
    pub notes: BTreeMap<String, String>,
}

/// An order as the gateway reports it.
///
/// Fields the server reads are typed; everything else is carried in
/// `extra` and returned to clients as received. Note values are always
/// re-encoded as strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "deserialize_notes")]
    pub notes: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GatewayOrder {
    /// Note value by key, ignoring blanks.
    pub fn note(&self, key: &str) -> Option<&str> {
        self.notes
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// The gateway encodes empty notes as `[]` and may send non-string values.
fn deserialize_notes<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k, s)),
                other => Some((k, other.to_string())),
            })
            .collect()),
        Value::Array(items) if items.is_empty() => Ok(BTreeMap::new()),
        Value::Null => Ok(BTreeMap::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected notes object, got {other}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Operations the server needs from the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order the payer will be asked to pay.
    async fn create_order(&self, request: &CreateOrderRequest)
        -> Result<GatewayOrder, GatewayError>;

    /// Fetch an order by id. `Ok(None)` when the gateway does not know it.
    async fn fetch_order(&self, order_id: &str) -> Result<Option<GatewayOrder>, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_notes_accept_an_object() {
        let order: GatewayOrder = serde_json::from_value(serde_json::json!({
            "id": "order_1",
            "entity": "order",
            "amount": 50000,
            "currency": "INR",
            "receipt": "receipt_1",
            "status": "created",
            "notes": {"type": "donation", "first_name": "Asha", "attempt": 2}
        }))
        .unwrap();

        assert_eq!(order.note("type"), Some("donation"));
        assert_eq!(order.note("attempt"), Some("2"));
        assert_eq!(order.extra.get("entity").and_then(|v| v.as_str()), Some("order"));
    }

    #[test]
    fn empty_notes_arrive_as_an_array() {
        let order: GatewayOrder = serde_json::from_value(serde_json::json!({
            "id": "order_2",
            "amount": 100,
            "currency": "INR",
            "notes": []
        }))
        .unwrap();
        assert!(order.notes.is_empty());
    }

    #[test]
    fn extra_fields_survive_reserialization() {
        let raw = serde_json::json!({
            "id": "order_3",
            "amount": 100,
            "currency": "INR",
            "amount_due": 100,
            "attempts": 0,
            "notes": {}
        });
        let order: GatewayOrder = serde_json::from_value(raw).unwrap();
        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["amount_due"], 100);
        assert_eq!(back["attempts"], 0);
        let fields = back.as_object().unwrap();
        assert!(!fields.contains_key("receipt"), "absent receipt stays absent");
        assert!(!fields.contains_key("status"), "absent status stays absent");
    }
}
