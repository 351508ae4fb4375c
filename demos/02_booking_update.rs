/// booking update - evaluate a booking document and print the fields to write back
use booking_refund_rs::{evaluate, BookingCancellationContext, PaymentTermConfig};

const BOOKING: &str = r#"{
    "bookingId": "BK-7781",
    "totalTourCost": "3150.00",
    "amountPaidToDate": "1575.00",
    "cancellationInitiatedBy": "Guest",
    "isNoShow": false,
    "supplierCostsCommitted": "1200.00",
    "bookingDate": "2026-01-04",
    "cancellationDate": "2026-05-12",
    "tourStartDate": "2026-06-20",
    "paymentTerm": "standard",
    "discountApplied": "175.00"
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let context = BookingCancellationContext::from_json(BOOKING)?;
    let result = evaluate(&context, &PaymentTermConfig::standard())?;

    let update = result.booking_update(&context);
    println!("{}", serde_json::to_string_pretty(&update)?);

    Ok(())
}
