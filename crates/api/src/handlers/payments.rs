//! Handlers for the payment flow.
//!
//! 1. `POST /payments/orders` creates a gateway order. Payer details travel
//!    in the order's notes; nothing is stored locally.
//! 2. `POST /payments/verify` checks the checkout signature, re-reads the
//!    order from the gateway and records a pending donation, membership or
//!    certification in one transaction.
//! 3. `POST /payments/webhook` checks the webhook signature over the raw
//!    body and approves the pending record once capture is confirmed.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use khcrf_core::error::{require_non_empty, CoreError};
use khcrf_core::payments::{
    check_required_notes, parse_dob, receipt_for, validate_amount, validate_currency,
    validate_payment_type, OrderMetadata, DEFAULT_CURRENCY, EVENT_PAYMENT_CAPTURED, NOTE_TYPE,
    PAYMENT_TYPE_CERTIFICATION, PAYMENT_TYPE_DONATION, PAYMENT_TYPE_MEMBERSHIP,
};
use khcrf_core::signature::{verify_payment_signature, verify_webhook_signature};
use khcrf_db::models::payment::{
    CreateCertification, CreateDonation, CreateMember, PaymentRecord,
};
use khcrf_db::repositories::{CertificationRepo, DonationRepo, MemberRepo};
use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::gateway::{CreateOrderRequest, GatewayOrder};
use crate::response::DataResponse;
use crate::state::AppState;

/// Header carrying the webhook's hex HMAC.
pub const WEBHOOK_SIGNATURE_HEADER: &str = "x-razorpay-signature";

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Body of `POST /payments/orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderInput {
    /// Minor currency units.
    pub amount: Option<i64>,
    pub currency: Option<String>,
    #[serde(rename = "type")]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub metadata: OrderMetadata,
}

/// Body of `POST /payments/verify`, as returned by the checkout widget.
#[derive(Debug, Deserialize)]
pub struct VerifyPaymentInput {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    event: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Acknowledgement returned to the gateway once a webhook is authenticated.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
    /// Records moved from pending to approved.
    pub updated: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/payments/orders
pub async fn create_order(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateOrderInput>,
) -> AppResult<impl IntoResponse> {
    let amount = input
        .amount
        .ok_or_else(|| AppError::Core(CoreError::Validation("'amount' is required".into())))?;
    validate_amount(amount)?;

    let currency = input
        .currency
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
    validate_currency(&currency)?;

    let payment_type = input.payment_type.unwrap_or_default();
    require_non_empty("type", Some(&payment_type))?;
    validate_payment_type(&payment_type)?;

    let request = CreateOrderRequest {
        amount,
        currency,
        receipt: receipt_for(chrono::Utc::now()),
        payment_capture: 1,
        notes: input.metadata.to_notes(&payment_type)?,
    };

    let order = state.gateway.create_order(&request).await?;

    tracing::info!(
        order_id = %order.id,
        amount = order.amount,
        currency = %order.currency,
        payment_type = %payment_type,
        "Payment order created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// POST /api/v1/payments/verify
pub async fn verify_payment(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyPaymentInput>,
) -> AppResult<impl IntoResponse> {
    require_non_empty("razorpay_order_id", input.razorpay_order_id.as_deref())?;
    require_non_empty("razorpay_payment_id", input.razorpay_payment_id.as_deref())?;
    require_non_empty("razorpay_signature", input.razorpay_signature.as_deref())?;
    let order_id = input.razorpay_order_id.unwrap_or_default();
    let payment_id = input.razorpay_payment_id.unwrap_or_default();
    let signature = input.razorpay_signature.unwrap_or_default();

    if !verify_payment_signature(
        &state.config.razorpay.key_secret,
        order_id.trim(),
        payment_id.trim(),
        signature.trim(),
    ) {
        tracing::warn!(order_id = %order_id, "Payment signature mismatch");
        return Err(AppError::BadRequest(
            "Payment signature verification failed".into(),
        ));
    }

    let order = state
        .gateway
        .fetch_order(order_id.trim())
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Unknown order: '{order_id}'")))?;

    let mut tx = state.pool.begin().await?;
    let record = match persist_record(&mut tx, &order, payment_id.trim()).await {
        Ok(record) => record,
        Err(e) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "Failed to roll back payment transaction");
            }
            return Err(conflict_if_recorded(e, &order.id));
        }
    };
    tx.commit().await?;

    tracing::info!(
        order_id = %order.id,
        payment_id = %payment_id.trim(),
        payment_type = record_kind(&record),
        "Payment verified",
    );

    Ok(Json(DataResponse { data: record }))
}

/// POST /api/v1/payments/webhook
///
/// The signature covers the exact bytes received, so the body is taken raw
/// and parsed only after it has been authenticated.
pub async fn razorpay_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    let signature = headers
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing webhook signature".into()))?;

    if !verify_webhook_signature(&state.config.razorpay.webhook_secret, &body, signature) {
        tracing::warn!("Webhook signature mismatch");
        return Err(AppError::BadRequest(
            "Webhook signature verification failed".into(),
        ));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid webhook payload: {e}")))?;

    if event.event != EVENT_PAYMENT_CAPTURED {
        tracing::debug!(event = %event.event, "Ignoring webhook event");
        return Ok(Json(DataResponse {
            data: WebhookAck {
                received: true,
                updated: 0,
            },
        }));
    }

    let order_id = event
        .payload
        .pointer("/payment/entity/order_id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::BadRequest("Webhook payload is missing payment.entity.order_id".into())
        })?;

    let updated = approve_order(&state, &order_id).await?;

    tracing::info!(order_id = %order_id, updated, "Payment capture webhook processed");

    Ok(Json(DataResponse {
        data: WebhookAck {
            received: true,
            updated,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record_kind(record: &PaymentRecord) -> &'static str {
    match record {
        PaymentRecord::Donation(_) => PAYMENT_TYPE_DONATION,
        PaymentRecord::Membership(_) => PAYMENT_TYPE_MEMBERSHIP,
        PaymentRecord::Certification(_) => PAYMENT_TYPE_CERTIFICATION,
    }
}

/// A second verification of the same order hits the unique gateway order id.
fn conflict_if_recorded(err: AppError, order_id: &str) -> AppError {
    match &err {
        AppError::Database(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            AppError::Core(CoreError::Conflict(format!(
                "Payment for order '{order_id}' is already recorded"
            )))
        }
        _ => err,
    }
}

fn note(order: &GatewayOrder, key: &str) -> Option<String> {
    order.note(key).map(str::to_string)
}

/// A note already checked by [`check_required_notes`].
fn required_note(order: &GatewayOrder, key: &str) -> AppResult<String> {
    note(order, key).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!("Missing required fields: {key}")))
    })
}

/// Validate the order's notes for its payment type and insert the matching
/// pending record.
async fn persist_record(
    tx: &mut Transaction<'_, Postgres>,
    order: &GatewayOrder,
    payment_id: &str,
) -> AppResult<PaymentRecord> {
    let payment_type = order.note(NOTE_TYPE).ok_or_else(|| {
        AppError::BadRequest(format!("Order '{}' carries no payment type", order.id))
    })?;
    validate_payment_type(payment_type)?;
    check_required_notes(&order.notes, payment_type)?;

    let record = match payment_type {
        PAYMENT_TYPE_DONATION => {
            let input = CreateDonation {
                donation_type: note(order, "donation_type"),
                first_name: required_note(order, "first_name")?,
                last_name: required_note(order, "last_name")?,
                email: required_note(order, "email")?,
                phone: required_note(order, "phone")?,
                amount: order.amount,
                currency: order.currency.clone(),
                message: note(order, "message"),
                gateway_order_id: order.id.clone(),
                gateway_payment_id: payment_id.to_string(),
                payment_method: note(order, "payment_method"),
            };
            PaymentRecord::Donation(DonationRepo::create(tx, &input).await?)
        }
        PAYMENT_TYPE_MEMBERSHIP => {
            let input = CreateMember {
                first_name: required_note(order, "first_name")?,
                last_name: required_note(order, "last_name")?,
                email: required_note(order, "email")?,
                phone: required_note(order, "phone")?,
                dob: parse_dob(&required_note(order, "dob")?)?,
                gender: required_note(order, "gender")?,
                nationality: required_note(order, "nationality")?,
                membership_type: note(order, "membership_type"),
                address: note(order, "address"),
                amount_paid: order.amount,
                currency: order.currency.clone(),
                gateway_order_id: order.id.clone(),
                gateway_payment_id: payment_id.to_string(),
                payment_method: required_note(order, "payment_method")?,
            };
            PaymentRecord::Membership(MemberRepo::create(tx, &input).await?)
        }
        PAYMENT_TYPE_CERTIFICATION => {
            let input = CreateCertification {
                cert_type: required_note(order, "cert_type")?,
                cert_name: required_note(order, "cert_name")?,
                amount_paid: order.amount,
                currency: order.currency.clone(),
                first_name: required_note(order, "first_name")?,
                last_name: required_note(order, "last_name")?,
                email: required_note(order, "email")?,
                phone: required_note(order, "phone")?,
                gateway_order_id: order.id.clone(),
                gateway_payment_id: payment_id.to_string(),
                payment_method: required_note(order, "payment_method")?,
            };
            PaymentRecord::Certification(CertificationRepo::create(tx, &input).await?)
        }
        other => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown payment type: '{other}'"
            ))))
        }
    };

    Ok(record)
}

/// Approve the pending record for `order_id`, returning how many rows moved.
///
/// Orders the gateway does not know, or that carry no recognizable type,
/// approve nothing.
async fn approve_order(state: &AppState, order_id: &str) -> AppResult<u64> {
    let Some(order) = state.gateway.fetch_order(order_id).await? else {
        tracing::warn!(order_id, "Webhook references an unknown order");
        return Ok(0);
    };

    let updated = match order.note(NOTE_TYPE) {
        Some(PAYMENT_TYPE_DONATION) => DonationRepo::approve_by_order_id(&state.pool, &order.id).await?,
        Some(PAYMENT_TYPE_MEMBERSHIP) => MemberRepo::approve_by_order_id(&state.pool, &order.id).await?,
        Some(PAYMENT_TYPE_CERTIFICATION) => {
            CertificationRepo::approve_by_order_id(&state.pool, &order.id).await?
        }
        other => {
            tracing::warn!(order_id, payment_type = ?other, "Webhook order has no known payment type");
            0
        }
    };

    Ok(updated)
}
