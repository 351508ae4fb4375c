pub mod config;
pub mod context;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod result;
pub mod types;

// re-export key types
pub use config::{AdminFeePolicy, PaymentTermConfig, TravelCreditPolicy};
pub use context::{BookingCancellationContext, BookingCancellationContextBuilder};
pub use decimal::{Money, Percentage};
pub use engine::{evaluate, RefundEngine};
pub use errors::{Result, ValidationError};
pub use events::{Event, EventStore};
pub use result::DecisionResult;
pub use types::{BookingId, CancellationInitiator, CancellationScenario, CancellationWindow};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
