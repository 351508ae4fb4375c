//! Worked cancellation scenarios, amounts in cents.

use booking_refund_rs::chrono::NaiveDate;
use booking_refund_rs::{
    evaluate, AdminFeePolicy, BookingCancellationContext, CancellationInitiator,
    CancellationScenario, CancellationWindow, Money, PaymentTermConfig, Percentage,
    TravelCreditPolicy,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn terms() -> PaymentTermConfig {
    PaymentTermConfig::new(
        "spring-tours",
        vec![
            CancellationWindow::new(60, 100),
            CancellationWindow::new(30, 50),
            CancellationWindow::new(7, 25),
        ],
    )
    .with_admin_fee(AdminFeePolicy::Flat {
        amount: Money::from_minor(50),
    })
}

/// guest cancellation 45 days before a June 1st departure
fn guest_cancellation() -> BookingCancellationContext {
    BookingCancellationContext::builder()
        .booking_id("BK-5001")
        .total_tour_cost(Money::from_minor(2_000))
        .amount_paid_to_date(Money::from_minor(1_000))
        .initiated_by(CancellationInitiator::Guest)
        .booking_date(date(2026, 1, 12))
        .cancellation_date(date(2026, 4, 17))
        .tour_start_date(date(2026, 6, 1))
        .payment_term("spring-tours")
        .build()
        .unwrap()
}

#[test]
fn guest_cancels_inside_fifty_percent_window() {
    let result = evaluate(&guest_cancellation(), &terms()).unwrap();

    assert_eq!(result.eligible_refund, Money::from_minor(500));
    assert_eq!(result.admin_fee, Money::from_minor(50));
    assert_eq!(result.refundable_amount, Money::from_minor(450));
    assert_eq!(result.non_refundable_amount, Money::from_minor(550));
    assert_eq!(result.refund_percentage, Percentage::from_whole(50));
    assert_eq!(result.cancellation_scenario, CancellationScenario::WindowedRefund);
}

#[test]
fn agency_cancellation_refunds_everything() {
    let mut context = guest_cancellation();
    context.cancellation_initiated_by = Some(CancellationInitiator::Iht);

    let result = evaluate(&context, &terms()).unwrap();
    assert_eq!(result.eligible_refund, Money::from_minor(1_000));
    assert_eq!(result.admin_fee, Money::ZERO);
    assert_eq!(result.cancellation_scenario, CancellationScenario::FullRefundIht);
}

#[test]
fn no_show_gets_nothing() {
    let mut context = guest_cancellation();
    context.is_no_show = true;
    context.cancellation_initiated_by = None;

    let result = evaluate(&context, &terms()).unwrap();
    assert_eq!(result.eligible_refund, Money::ZERO);
    assert_eq!(result.admin_fee, Money::ZERO);
    assert_eq!(result.cancellation_scenario, CancellationScenario::NoShow);
}

#[test]
fn committed_supplier_costs_absorb_refund() {
    let mut context = guest_cancellation();
    context.supplier_costs_committed = Money::from_minor(600);

    let result = evaluate(&context, &terms()).unwrap();
    assert_eq!(result.admin_fee, Money::ZERO);
    assert_eq!(result.eligible_refund, Money::ZERO);
    assert_eq!(result.cancellation_scenario, CancellationScenario::SupplierCostException);
}

#[test]
fn cancellation_after_departure_refunds_nothing() {
    let mut context = guest_cancellation();
    context.cancellation_date = date(2026, 6, 2);

    let result = evaluate(&context, &terms()).unwrap();
    assert_eq!(result.refund_percentage, Percentage::ZERO);
    assert_eq!(result.eligible_refund, Money::ZERO);
    assert_eq!(result.cancellation_scenario, CancellationScenario::ZeroRefund);
}

#[test]
fn cancellation_inside_last_week_matches_no_window() {
    // no window reaches below 7 days in these terms
    let mut context = guest_cancellation();
    context.cancellation_date = date(2026, 5, 28);

    let result = evaluate(&context, &terms()).unwrap();
    assert_eq!(result.days_before_departure, 4);
    assert_eq!(result.cancellation_scenario, CancellationScenario::ZeroRefund);
}

#[test]
fn flexible_terms_issue_credit_for_retained_balance() {
    let context = BookingCancellationContext::builder()
        .booking_id("BK-5002")
        .total_tour_cost(Money::from_major(3_200))
        .amount_paid_to_date(Money::from_major(1_600))
        .initiated_by(CancellationInitiator::Guest)
        .booking_date(date(2026, 2, 1))
        .cancellation_date(date(2026, 5, 10))
        .tour_start_date(date(2026, 6, 1))
        .payment_term("flexible")
        .build()
        .unwrap();

    // 22 days out: 50% window, flat $50 fee
    let result = evaluate(&context, &PaymentTermConfig::flexible()).unwrap();
    assert_eq!(result.eligible_refund, Money::from_major(800));
    assert_eq!(result.admin_fee, Money::from_major(50));
    assert_eq!(result.refundable_amount, Money::from_major(750));
    assert_eq!(result.non_refundable_amount, Money::from_major(850));
    assert_eq!(result.travel_credit_issued, Money::from_major(850));
    assert_eq!(PaymentTermConfig::flexible().travel_credit, TravelCreditPolicy::CreditNonRefundable);
}

#[test]
fn standard_terms_cap_percentage_fee() {
    let context = BookingCancellationContext::builder()
        .booking_id("BK-5003")
        .total_tour_cost(Money::from_major(4_000))
        .amount_paid_to_date(Money::from_major(4_000))
        .initiated_by(CancellationInitiator::Guest)
        .booking_date(date(2026, 1, 2))
        .cancellation_date(date(2026, 1, 20))
        .tour_start_date(date(2026, 6, 1))
        .build()
        .unwrap();

    // 10% of $4,000 would be $400, capped at $150
    let result = evaluate(&context, &PaymentTermConfig::standard()).unwrap();
    assert_eq!(result.eligible_refund, Money::from_major(4_000));
    assert_eq!(result.admin_fee, Money::from_major(150));
    assert_eq!(result.refundable_amount, Money::from_major(3_850));
}

#[test]
fn fractional_percentage_rounds_half_up_once() {
    let terms = PaymentTermConfig::new(
        "odd",
        vec![CancellationWindow {
            days_before_departure: 0,
            refund_percentage: Percentage::from_decimal(booking_refund_rs::Decimal::new(335, 1)),
        }],
    );
    let mut context = guest_cancellation();
    context.payment_term = None;
    context.amount_paid_to_date = Money::from_minor(1_050);

    // 33.5% of 10.50 = 3.5175 -> 3.52
    let result = evaluate(&context, &terms).unwrap();
    assert_eq!(result.eligible_refund, Money::from_minor(352));
    assert_eq!(result.refundable_amount + result.non_refundable_amount, Money::from_minor(1_050));
}

#[test]
fn booking_document_round_trip() {
    let json = r#"{
        "bookingId": "BK-5004",
        "totalTourCost": "1800.00",
        "amountPaidToDate": "900.00",
        "cancellationInitiatedBy": "Guest",
        "isNoShow": false,
        "supplierCostsCommitted": "950.00",
        "bookingDate": "2026-03-01",
        "cancellationDate": "2026-04-20",
        "tourStartDate": "2026-06-01"
    }"#;

    let context = BookingCancellationContext::from_json(json).unwrap();
    let result = evaluate(&context, &PaymentTermConfig::standard()).unwrap();
    let update = result.booking_update(&context);

    assert_eq!(update["cancellationScenario"], "supplier-cost-exception");
    assert_eq!(update["cancellationInitiatedBy"], "Guest");
    assert_eq!(update["isNoShow"], false);
}

#[test]
fn sub_cent_document_amounts_round_before_deciding() {
    let json = r#"{
        "bookingId": "BK-5005",
        "totalTourCost": "2000.00",
        "amountPaidToDate": "1000.005",
        "cancellationInitiatedBy": "Guest",
        "bookingDate": "2026-01-12",
        "cancellationDate": "2026-04-17",
        "tourStartDate": "2026-06-01"
    }"#;

    let context = BookingCancellationContext::from_json(json).unwrap();
    assert_eq!(context.amount_paid_to_date, Money::from_minor(100_001));

    // 45 days out under standard terms: 50% of 1000.01 = 500.005 -> 500.01,
    // fee 10% = 50.001 -> 50.00
    let result = evaluate(&context, &PaymentTermConfig::standard()).unwrap();
    assert_eq!(result.eligible_refund, Money::from_minor(50_001));
    assert_eq!(result.admin_fee, Money::from_minor(5_000));
    assert_eq!(result.refundable_amount, Money::from_minor(45_001));
    assert_eq!(result.non_refundable_amount, Money::from_minor(55_000));

    let mut agency = context.clone();
    agency.cancellation_initiated_by = Some(CancellationInitiator::Iht);
    let result = evaluate(&agency, &PaymentTermConfig::standard()).unwrap();
    assert_eq!(result.eligible_refund, Money::from_minor(100_001));
    assert_eq!(result.eligible_refund.to_string(), "1000.01");
}
