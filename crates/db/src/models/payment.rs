//! Monetary records written by the payment flow.
//!
//! Amounts are stored in minor currency units exactly as the gateway
//! reports them. All three record types start `pending` and move to
//! `approved` only when a captured-payment webhook arrives.

use chrono::NaiveDate;
use khcrf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub donation_type: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub amount: i64,
    pub currency: String,
    pub message: Option<String>,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub nationality: String,
    pub membership_type: Option<String>,
    pub address: Option<String>,
    pub amount_paid: i64,
    pub currency: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `certifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Certification {
    pub id: DbId,
    pub cert_type: String,
    pub cert_name: String,
    pub amount_paid: i64,
    pub currency: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (built from verified gateway orders, never from request bodies)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateDonation {
    pub donation_type: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub amount: i64,
    pub currency: String,
    pub message: Option<String>,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub nationality: String,
    pub membership_type: Option<String>,
    pub address: Option<String>,
    pub amount_paid: i64,
    pub currency: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: String,
}

#[derive(Debug, Clone)]
pub struct CreateCertification {
    pub cert_type: String,
    pub cert_name: String,
    pub amount_paid: i64,
    pub currency: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub payment_method: String,
}

/// A record created by a verified payment, tagged with its payment type.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "snake_case")]
pub enum PaymentRecord {
    Donation(Donation),
    Membership(Member),
    Certification(Certification),
}
