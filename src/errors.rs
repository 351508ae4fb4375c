use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::{Money, Percentage};

/// every way an evaluation input can be rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("negative amount for {field}: {amount}")]
    NegativeAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("amount paid {amount_paid} exceeds total tour cost {total_tour_cost}")]
    PaidExceedsTourCost {
        amount_paid: Money,
        total_tour_cost: Money,
    },

    #[error("cancellation initiator missing on a booking that is not a no-show")]
    MissingInitiator,

    #[error("unknown cancellation initiator: {value:?}")]
    UnknownInitiator {
        value: String,
    },

    #[error("payment term {term:?} has no cancellation windows")]
    EmptyPaymentTerm {
        term: String,
    },

    #[error("payment term windows out of order: {previous} days followed by {next} days")]
    UnorderedWindows {
        previous: u32,
        next: u32,
    },

    #[error("refund percentage out of range: {percentage}")]
    InvalidRefundPercentage {
        percentage: Percentage,
    },

    #[error("invalid admin fee: {message}")]
    InvalidAdminFee {
        message: String,
    },

    #[error("payment term mismatch: booking references {expected:?}, got {provided:?}")]
    PaymentTermMismatch {
        expected: String,
        provided: String,
    },

    #[error("cancellation date {cancellation_date} is before booking date {booking_date}")]
    CancellationBeforeBooking {
        cancellation_date: NaiveDate,
        booking_date: NaiveDate,
    },

    #[error("invalid document: {message}")]
    InvalidDocument {
        message: String,
    },
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        ValidationError::InvalidDocument {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
