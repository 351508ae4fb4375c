use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::errors::{Result, ValidationError};
use crate::types::CancellationWindow;

/// payment term configuration: refund windows plus the fee and credit policies
/// the agency applies to guest cancellations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTermConfig {
    pub name: String,
    /// furthest-out window first, thresholds strictly descending
    pub windows: Vec<CancellationWindow>,
    #[serde(default)]
    pub admin_fee: AdminFeePolicy,
    #[serde(default)]
    pub travel_credit: TravelCreditPolicy,
}

/// admin fee charged against a guest's eligible refund
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AdminFeePolicy {
    #[default]
    None,
    Flat {
        amount: Money,
    },
    Percentage {
        percentage: Percentage,
        /// upper bound on the computed fee
        #[serde(default)]
        cap: Option<Money>,
    },
}

impl AdminFeePolicy {
    /// fee owed on `eligible_refund`, never more than the refund itself
    pub fn fee_for(&self, eligible_refund: Money) -> Money {
        let fee = match *self {
            AdminFeePolicy::None => Money::ZERO,
            AdminFeePolicy::Flat { amount } => amount,
            AdminFeePolicy::Percentage { percentage, cap } => {
                let fee = eligible_refund.percentage(percentage);
                match cap {
                    Some(cap) => fee.min(cap),
                    None => fee,
                }
            }
        };
        fee.min(eligible_refund).max(Money::ZERO)
    }

    fn validate(&self) -> Result<()> {
        match *self {
            AdminFeePolicy::None => Ok(()),
            AdminFeePolicy::Flat { amount } if amount.is_negative() => {
                Err(ValidationError::InvalidAdminFee {
                    message: format!("flat fee is negative: {amount}"),
                })
            }
            AdminFeePolicy::Flat { .. } => Ok(()),
            AdminFeePolicy::Percentage { percentage, cap } => {
                if !percentage.is_valid() {
                    return Err(ValidationError::InvalidAdminFee {
                        message: format!("fee percentage out of range: {percentage}"),
                    });
                }
                if let Some(cap) = cap.filter(|c| c.is_negative()) {
                    return Err(ValidationError::InvalidAdminFee {
                        message: format!("fee cap is negative: {cap}"),
                    });
                }
                Ok(())
            }
        }
    }
}

/// what happens to the non-refundable balance of a guest cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TravelCreditPolicy {
    /// retained by the agency
    #[default]
    Forfeit,
    /// issued back to the guest as credit toward a future tour
    CreditNonRefundable,
}

impl PaymentTermConfig {
    pub fn new(name: impl Into<String>, windows: Vec<CancellationWindow>) -> Self {
        Self {
            name: name.into(),
            windows,
            admin_fee: AdminFeePolicy::None,
            travel_credit: TravelCreditPolicy::Forfeit,
        }
    }

    pub fn with_admin_fee(mut self, admin_fee: AdminFeePolicy) -> Self {
        self.admin_fee = admin_fee;
        self
    }

    pub fn with_travel_credit(mut self, travel_credit: TravelCreditPolicy) -> Self {
        self.travel_credit = travel_credit;
        self
    }

    /// standard tour terms: full refund 90+ days out, sliding down to nothing
    /// inside two weeks, 10% admin fee capped at $150
    pub fn standard() -> Self {
        Self::new(
            "standard",
            vec![
                CancellationWindow::new(90, 100),
                CancellationWindow::new(60, 75),
                CancellationWindow::new(30, 50),
                CancellationWindow::new(14, 25),
                CancellationWindow::new(0, 0),
            ],
        )
        .with_admin_fee(AdminFeePolicy::Percentage {
            percentage: Percentage::from_decimal(dec!(10)),
            cap: Some(Money::from_major(150)),
        })
    }

    /// flexible terms: flat $50 fee, whatever is not refunded comes back as
    /// travel credit
    pub fn flexible() -> Self {
        Self::new(
            "flexible",
            vec![
                CancellationWindow::new(45, 100),
                CancellationWindow::new(21, 50),
                CancellationWindow::new(0, 0),
            ],
        )
        .with_admin_fee(AdminFeePolicy::Flat {
            amount: Money::from_major(50),
        })
        .with_travel_credit(TravelCreditPolicy::CreditNonRefundable)
    }

    /// non-refundable fares: nothing back on guest cancellation
    pub fn non_refundable() -> Self {
        Self::new("non_refundable", vec![CancellationWindow::new(0, 0)])
    }

    /// load a configuration document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PaymentTermConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// check windows are non-empty, strictly descending and within 0..=100%,
    /// and the fee policy is well formed
    pub fn validate(&self) -> Result<()> {
        if self.windows.is_empty() {
            return Err(ValidationError::EmptyPaymentTerm {
                term: self.name.clone(),
            });
        }

        for window in &self.windows {
            if !window.refund_percentage.is_valid() {
                return Err(ValidationError::InvalidRefundPercentage {
                    percentage: window.refund_percentage,
                });
            }
        }

        for pair in self.windows.windows(2) {
            if pair[1].days_before_departure >= pair[0].days_before_departure {
                return Err(ValidationError::UnorderedWindows {
                    previous: pair[0].days_before_departure,
                    next: pair[1].days_before_departure,
                });
            }
        }

        self.admin_fee.validate()
    }

    /// first window covering a cancellation `days_before_departure` days out
    pub fn window_for(&self, days_before_departure: i64) -> Option<&CancellationWindow> {
        self.windows.iter().find(|w| w.covers(days_before_departure))
    }

    /// refund percentage for a cancellation this many days out, zero when no
    /// window covers it (cancelled after departure)
    pub fn refund_percentage_for(&self, days_before_departure: i64) -> Percentage {
        self.window_for(days_before_departure)
            .map(|w| w.refund_percentage)
            .unwrap_or(Percentage::ZERO)
    }
}
