//! Integration tests for monetary records: transactional creation and the
//! pending -> approved transition.

use chrono::NaiveDate;
use khcrf_db::models::payment::{CreateCertification, CreateDonation, CreateMember};
use khcrf_db::repositories::{CertificationRepo, DonationRepo, MemberRepo};
use sqlx::PgPool;

fn new_donation(order_id: &str) -> CreateDonation {
    CreateDonation {
        donation_type: Some("general".to_string()),
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.org".to_string(),
        phone: "9999999999".to_string(),
        amount: 50_000,
        currency: "INR".to_string(),
        message: None,
        gateway_order_id: order_id.to_string(),
        gateway_payment_id: format!("pay_for_{order_id}"),
        payment_method: Some("upi".to_string()),
    }
}

fn new_member(order_id: &str) -> CreateMember {
    CreateMember {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        email: "asha@example.org".to_string(),
        phone: "9999999999".to_string(),
        dob: NaiveDate::from_ymd_opt(1990, 1, 31).unwrap(),
        gender: "female".to_string(),
        nationality: "Indian".to_string(),
        membership_type: Some("annual".to_string()),
        address: None,
        amount_paid: 100_000,
        currency: "INR".to_string(),
        gateway_order_id: order_id.to_string(),
        gateway_payment_id: format!("pay_for_{order_id}"),
        payment_method: "card".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn committed_donation_starts_pending(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let donation = DonationRepo::create(&mut tx, &new_donation("order_1"))
        .await
        .unwrap();
    tx.commit().await.unwrap();

    assert_eq!(donation.status, "pending");
    assert_eq!(donation.amount, 50_000);

    let found = DonationRepo::find_by_order_id(&pool, "order_1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, donation.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn rolled_back_member_leaves_no_row(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let member = MemberRepo::create(&mut tx, &new_member("order_2")).await.unwrap();
    assert_eq!(member.full_name, "Asha Rao");
    tx.rollback().await.unwrap();

    assert!(MemberRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn dropped_transaction_rolls_back(pool: PgPool) {
    {
        let mut tx = pool.begin().await.unwrap();
        DonationRepo::create(&mut tx, &new_donation("order_3"))
            .await
            .unwrap();
    }
    assert!(DonationRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn approve_flips_only_the_matching_order(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    DonationRepo::create(&mut tx, &new_donation("order_a")).await.unwrap();
    DonationRepo::create(&mut tx, &new_donation("order_b")).await.unwrap();
    tx.commit().await.unwrap();

    let changed = DonationRepo::approve_by_order_id(&pool, "order_a").await.unwrap();
    assert_eq!(changed, 1);

    let a = DonationRepo::find_by_order_id(&pool, "order_a").await.unwrap().unwrap();
    let b = DonationRepo::find_by_order_id(&pool, "order_b").await.unwrap().unwrap();
    assert_eq!(a.status, "approved");
    assert_eq!(b.status, "pending");

    // Already approved and unknown orders are no-ops.
    assert_eq!(DonationRepo::approve_by_order_id(&pool, "order_a").await.unwrap(), 0);
    assert_eq!(DonationRepo::approve_by_order_id(&pool, "order_zz").await.unwrap(), 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_order_id_violates_unique_constraint(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    CertificationRepo::create(
        &mut tx,
        &CreateCertification {
            cert_type: "organic".to_string(),
            cert_name: "Farm A".to_string(),
            amount_paid: 25_000,
            currency: "INR".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.org".to_string(),
            phone: "9999999999".to_string(),
            gateway_order_id: "order_dup".to_string(),
            gateway_payment_id: "pay_1".to_string(),
            payment_method: "upi".to_string(),
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let err = CertificationRepo::create(
        &mut tx,
        &CreateCertification {
            cert_type: "organic".to_string(),
            cert_name: "Farm A".to_string(),
            amount_paid: 25_000,
            currency: "INR".to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.org".to_string(),
            phone: "9999999999".to_string(),
            gateway_order_id: "order_dup".to_string(),
            gateway_payment_id: "pay_2".to_string(),
            payment_method: "upi".to_string(),
        },
    )
    .await
    .expect_err("second record for the same order must fail");

    let db_err = err.as_database_error().unwrap();
    assert_eq!(db_err.constraint(), Some("uq_certifications_gateway_order_id"));
}

#[sqlx::test(migrations = "./migrations")]
async fn non_positive_amount_is_rejected_by_schema(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let mut input = new_donation("order_zero");
    input.amount = 0;
    let err = DonationRepo::create(&mut tx, &input).await.unwrap_err();
    assert_eq!(
        err.as_database_error().unwrap().constraint(),
        Some("ck_donations_amount_positive")
    );
}
