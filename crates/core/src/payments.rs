//! Payment types, lifecycle statuses, and gateway order rules.
//!
//! A gateway order carries everything needed to persist the eventual record
//! in its `notes` map, so verification never trusts client-supplied
//! amounts or types. This module owns the shape of those notes and the
//! per-type required-field subsets checked at verification time.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Payment types
// ---------------------------------------------------------------------------

pub const PAYMENT_TYPE_DONATION: &str = "donation";
pub const PAYMENT_TYPE_MEMBERSHIP: &str = "membership";
pub const PAYMENT_TYPE_CERTIFICATION: &str = "certification";

/// All valid payment types.
pub const VALID_PAYMENT_TYPES: &[&str] = &[
    PAYMENT_TYPE_DONATION,
    PAYMENT_TYPE_MEMBERSHIP,
    PAYMENT_TYPE_CERTIFICATION,
];

/// Validate that a payment type string is one of the known types.
pub fn validate_payment_type(payment_type: &str) -> Result<(), CoreError> {
    if VALID_PAYMENT_TYPES.contains(&payment_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid payment type: '{payment_type}'. Valid types: {}",
            VALID_PAYMENT_TYPES.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

/// Set when a record is created after a verified checkout.
pub const STATUS_PENDING: &str = "pending";
/// Set only by a webhook-confirmed capture.
pub const STATUS_APPROVED: &str = "approved";

// ---------------------------------------------------------------------------
// Gateway constants
// ---------------------------------------------------------------------------

pub const DEFAULT_CURRENCY: &str = "INR";

/// The gateway rejects orders with more than this many notes.
pub const MAX_GATEWAY_NOTES: usize = 15;

/// The gateway rejects note values longer than this.
pub const MAX_NOTE_VALUE_LEN: usize = 256;

/// Webhook event confirming that funds were captured.
pub const EVENT_PAYMENT_CAPTURED: &str = "payment.captured";

/// Notes key under which the payment type travels with the order.
pub const NOTE_TYPE: &str = "type";

// ---------------------------------------------------------------------------
// Order metadata
// ---------------------------------------------------------------------------

/// Payer details submitted with an order request.
///
/// Identity fields are required for every type; the rest depend on the type
/// and are checked again when the payment is verified.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderMetadata {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub membership_type: Option<String>,
    pub address: Option<String>,
    pub payment_method: Option<String>,
    pub donation_type: Option<String>,
    pub message: Option<String>,
    pub cert_type: Option<String>,
    pub cert_name: Option<String>,
}

/// Fields every order must carry regardless of type.
pub const IDENTITY_FIELDS: &[&str] = &["first_name", "last_name", "email", "phone"];

impl OrderMetadata {
    fn entries(&self) -> [(&'static str, &Option<String>); 14] {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("dob", &self.dob),
            ("gender", &self.gender),
            ("nationality", &self.nationality),
            ("membership_type", &self.membership_type),
            ("address", &self.address),
            ("payment_method", &self.payment_method),
            ("donation_type", &self.donation_type),
            ("message", &self.message),
            ("cert_type", &self.cert_type),
            ("cert_name", &self.cert_name),
        ]
    }

    /// Build the gateway `notes` map for an order of `payment_type`.
    ///
    /// Blank values are omitted. Fails if identity fields are missing or the
    /// result would exceed the gateway's notes limits.
    pub fn to_notes(&self, payment_type: &str) -> Result<BTreeMap<String, String>, CoreError> {
        validate_payment_type(payment_type)?;

        let mut notes = BTreeMap::new();
        notes.insert(NOTE_TYPE.to_string(), payment_type.to_string());
        for (key, value) in self.entries() {
            if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                notes.insert(key.to_string(), v.to_string());
            }
        }

        check_missing(&notes, IDENTITY_FIELDS)?;
        validate_notes_limits(&notes)?;
        Ok(notes)
    }
}

/// Enforce the gateway's notes count and value length limits.
pub fn validate_notes_limits(notes: &BTreeMap<String, String>) -> Result<(), CoreError> {
    if notes.len() > MAX_GATEWAY_NOTES {
        return Err(CoreError::Validation(format!(
            "Order notes exceed the gateway limit of {MAX_GATEWAY_NOTES} fields ({} given)",
            notes.len()
        )));
    }
    if let Some((key, _)) = notes
        .iter()
        .find(|(_, v)| v.chars().count() > MAX_NOTE_VALUE_LEN)
    {
        return Err(CoreError::Validation(format!(
            "'{key}' must be at most {MAX_NOTE_VALUE_LEN} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Verification-time checks
// ---------------------------------------------------------------------------

/// Required non-empty notes for each payment type at verification time.
pub fn required_fields_for(payment_type: &str) -> &'static [&'static str] {
    match payment_type {
        PAYMENT_TYPE_MEMBERSHIP => &[
            "first_name",
            "last_name",
            "email",
            "phone",
            "dob",
            "gender",
            "nationality",
            "payment_method",
        ],
        PAYMENT_TYPE_CERTIFICATION => &[
            "first_name",
            "last_name",
            "email",
            "phone",
            "cert_type",
            "cert_name",
            "payment_method",
        ],
        _ => IDENTITY_FIELDS,
    }
}

/// Check that every field required by `payment_type` is present in `notes`.
pub fn check_required_notes(
    notes: &BTreeMap<String, String>,
    payment_type: &str,
) -> Result<(), CoreError> {
    validate_payment_type(payment_type)?;
    check_missing(notes, required_fields_for(payment_type))
}

fn check_missing(notes: &BTreeMap<String, String>, fields: &[&str]) -> Result<(), CoreError> {
    let missing: Vec<&str> = fields
        .iter()
        .copied()
        .filter(|f| notes.get(*f).map_or(true, |v| v.trim().is_empty()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}

/// Order amounts are integer minor units and must be positive.
pub fn validate_amount(amount: i64) -> Result<(), CoreError> {
    if amount > 0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Amount must be greater than zero (got {amount})"
        )))
    }
}

/// Currencies are three-letter uppercase ISO 4217 codes.
pub fn validate_currency(currency: &str) -> Result<(), CoreError> {
    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid currency code: '{currency}'"
        )))
    }
}

/// Parse a `YYYY-MM-DD` date of birth.
pub fn parse_dob(dob: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(dob.trim(), "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("'dob' must be a YYYY-MM-DD date (got '{dob}')"))
    })
}

/// Receipt identifier sent with each new order.
pub fn receipt_for(now: Timestamp) -> String {
    format!("receipt_{}", now.timestamp_millis())
}
