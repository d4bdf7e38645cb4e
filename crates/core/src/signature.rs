//! HMAC-SHA256 signatures used by the payment gateway.
//!
//! Two signatures are checked:
//!
//! - the checkout confirmation, signed over `"{order_id}|{payment_id}"` with
//!   the API key secret;
//! - webhook deliveries, signed over the raw request body with the webhook
//!   secret.
//!
//! Verification decodes the supplied hex and delegates the comparison to
//! [`Mac::verify_slice`], which compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute a lowercase hex HMAC-SHA256 of `message` under `secret`.
pub fn compute_hmac_hex(secret: &[u8], message: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a hex-encoded HMAC-SHA256 signature over `message`.
///
/// Returns `false` for signatures that are not valid hex.
pub fn verify_hmac_hex(secret: &[u8], message: &[u8], signature_hex: &str) -> bool {
    let Ok(supplied) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(message);
    mac.verify_slice(&supplied).is_ok()
}

/// The message the gateway signs when confirming a checkout.
pub fn payment_signature_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Verify the signature returned to the browser after checkout completes.
pub fn verify_payment_signature(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> bool {
    let message = payment_signature_message(order_id, payment_id);
    verify_hmac_hex(key_secret.as_bytes(), message.as_bytes(), signature)
}

/// Verify the `X-Razorpay-Signature` header against the raw webhook body.
pub fn verify_webhook_signature(webhook_secret: &str, body: &[u8], signature: &str) -> bool {
    verify_hmac_hex(webhook_secret.as_bytes(), body, signature)
}
