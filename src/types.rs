use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decimal::Percentage;
use crate::errors::{Result, ValidationError};

/// booking document identifier as issued by the document store
pub type BookingId = String;

/// who initiated the cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancellationInitiator {
    /// the guest cancelled
    Guest,
    /// the agency cancelled (company-caused)
    #[serde(rename = "IHT")]
    Iht,
}

impl CancellationInitiator {
    /// parse a document value where an empty string means "not cancelled"
    pub fn parse_optional(value: &str) -> Result<Option<Self>> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CancellationInitiator::Guest => "Guest",
            CancellationInitiator::Iht => "IHT",
        }
    }
}

impl FromStr for CancellationInitiator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("guest") => Ok(CancellationInitiator::Guest),
            v if v.eq_ignore_ascii_case("iht") => Ok(CancellationInitiator::Iht),
            other => Err(ValidationError::UnknownInitiator {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CancellationInitiator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// which rule path produced a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CancellationScenario {
    /// guest did not show up, nothing is refunded
    #[serde(rename = "no-show")]
    NoShow,
    /// agency cancelled, everything paid is refunded
    #[serde(rename = "full-refund-IHT")]
    FullRefundIht,
    /// guest cancelled inside a window paying a partial or full refund
    #[serde(rename = "windowed-refund")]
    WindowedRefund,
    /// guest cancelled where no refund is due
    #[serde(rename = "zero-refund")]
    ZeroRefund,
    /// committed supplier costs absorbed the refund, admin fee waived
    #[serde(rename = "supplier-cost-exception")]
    SupplierCostException,
}

impl CancellationScenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            CancellationScenario::NoShow => "no-show",
            CancellationScenario::FullRefundIht => "full-refund-IHT",
            CancellationScenario::WindowedRefund => "windowed-refund",
            CancellationScenario::ZeroRefund => "zero-refund",
            CancellationScenario::SupplierCostException => "supplier-cost-exception",
        }
    }
}

impl fmt::Display for CancellationScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// payment term window: cancelling at least `days_before_departure` days out
/// refunds `refund_percentage` of the amount paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationWindow {
    pub days_before_departure: u32,
    pub refund_percentage: Percentage,
}

impl CancellationWindow {
    pub fn new(days_before_departure: u32, refund_percentage: u32) -> Self {
        Self {
            days_before_departure,
            refund_percentage: Percentage::from_whole(refund_percentage),
        }
    }

    /// whether a cancellation this many days out falls in the window
    pub fn covers(&self, days_before_departure: i64) -> bool {
        i64::from(self.days_before_departure) <= days_before_departure
    }
}
