/// payment terms - load terms from a document and walk the refund windows
use booking_refund_rs::chrono::{Duration, TimeZone, Utc};
use booking_refund_rs::{
    BookingCancellationContext, CancellationInitiator, EventStore, Money, PaymentTermConfig,
    RefundEngine, SafeTimeProvider, TimeSource,
};

const TERMS: &str = r#"{
    "name": "alpine-2026",
    "windows": [
        { "daysBeforeDeparture": 90, "refundPercentage": "100" },
        { "daysBeforeDeparture": 45, "refundPercentage": "60" },
        { "daysBeforeDeparture": 15, "refundPercentage": "20" }
    ],
    "adminFee": { "type": "percentage", "percentage": "5", "cap": "75" },
    "travelCredit": "creditNonRefundable"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== refund windows ===\n");

    let engine = RefundEngine::new(PaymentTermConfig::from_json(TERMS)?)?;

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().ok_or("bad time")?,
    ));
    let controller = time.test_control().unwrap();
    let departure = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).single().ok_or("bad time")?;

    // cancel on successive dates as departure approaches
    for step in 0..6 {
        let context = BookingCancellationContext::builder()
            .booking_id(format!("BK-ALP-{step}"))
            .total_tour_cost(Money::from_major(5_000))
            .amount_paid_to_date(Money::from_major(2_000))
            .initiated_by(CancellationInitiator::Guest)
            .booking_date(time.now().date_naive() - Duration::days(30 * step))
            .tour_start_date(departure.date_naive())
            .payment_term("alpine-2026")
            .set_time(&time)
            .build()?;

        let mut events = EventStore::new();
        let result = engine.evaluate_with_events(&context, &mut events)?;

        println!(
            "{:>4} days out: {:<16} refund {:>8}  fee {:>6}  credit {:>8}",
            result.days_before_departure,
            result.cancellation_scenario.to_string(),
            result.refundable_amount,
            result.admin_fee,
            result.travel_credit_issued,
        );
        println!("      {} rule steps recorded", events.events().len());

        controller.advance(Duration::days(25));
    }

    Ok(())
}
