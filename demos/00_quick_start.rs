/// quick start - decide the refund for one guest cancellation
use booking_refund_rs::chrono::NaiveDate;
use booking_refund_rs::{evaluate, BookingCancellationContext, CancellationInitiator, Money, PaymentTermConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let context = BookingCancellationContext::builder()
        .booking_id("BK-0001")
        .total_tour_cost(Money::from_major(2_400))
        .amount_paid_to_date(Money::from_major(1_200))
        .initiated_by(CancellationInitiator::Guest)
        .booking_date(NaiveDate::from_ymd_opt(2026, 1, 15).ok_or("bad date")?)
        .cancellation_date(NaiveDate::from_ymd_opt(2026, 4, 17).ok_or("bad date")?)
        .tour_start_date(NaiveDate::from_ymd_opt(2026, 6, 1).ok_or("bad date")?)
        .build()?;

    let result = evaluate(&context, &PaymentTermConfig::standard())?;
    println!("{}", result.to_json_pretty()?);

    Ok(())
}
