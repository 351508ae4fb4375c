use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{Result, ValidationError};
use crate::types::{BookingId, CancellationInitiator};

/// snapshot of a booking's financial facts at the moment cancellation is
/// requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCancellationContext {
    pub booking_id: BookingId,
    pub total_tour_cost: Money,
    /// reservation fee plus settled installments
    pub amount_paid_to_date: Money,
    #[serde(default, deserialize_with = "deserialize_initiator")]
    pub cancellation_initiated_by: Option<CancellationInitiator>,
    #[serde(default)]
    pub is_no_show: bool,
    #[serde(default)]
    pub supplier_costs_committed: Money,
    pub booking_date: NaiveDate,
    pub cancellation_date: NaiveDate,
    pub tour_start_date: NaiveDate,
    /// name of the payment term configuration the booking was sold under
    #[serde(default)]
    pub payment_term: Option<String>,
    /// already reflected in `total_tour_cost`; only checked for sign, since the
    /// pre-discount price is not on the booking
    #[serde(default)]
    pub discount_applied: Option<Money>,
}

fn deserialize_initiator<'de, D>(deserializer: D) -> std::result::Result<Option<CancellationInitiator>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(value) => CancellationInitiator::parse_optional(&value).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl BookingCancellationContext {
    pub fn builder() -> BookingCancellationContextBuilder<'static> {
        BookingCancellationContextBuilder::new()
    }

    /// load a booking snapshot document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let context: BookingCancellationContext = serde_json::from_str(json)?;
        context.validate()?;
        Ok(context)
    }

    /// whole days from cancellation to departure; negative once the tour has
    /// started
    pub fn days_before_departure(&self) -> i64 {
        (self.tour_start_date - self.cancellation_date).num_days()
    }

    pub fn validate(&self) -> Result<()> {
        let amounts = [
            ("totalTourCost", Some(self.total_tour_cost)),
            ("amountPaidToDate", Some(self.amount_paid_to_date)),
            ("supplierCostsCommitted", Some(self.supplier_costs_committed)),
            ("discountApplied", self.discount_applied),
        ];
        for (field, amount) in amounts {
            if let Some(amount) = amount.filter(|a| a.is_negative()) {
                return Err(ValidationError::NegativeAmount { field, amount });
            }
        }

        if self.amount_paid_to_date > self.total_tour_cost {
            return Err(ValidationError::PaidExceedsTourCost {
                amount_paid: self.amount_paid_to_date,
                total_tour_cost: self.total_tour_cost,
            });
        }

        if self.cancellation_date < self.booking_date {
            return Err(ValidationError::CancellationBeforeBooking {
                cancellation_date: self.cancellation_date,
                booking_date: self.booking_date,
            });
        }

        if !self.is_no_show && self.cancellation_initiated_by.is_none() {
            return Err(ValidationError::MissingInitiator);
        }

        Ok(())
    }
}

/// assembles a context from a booking record; the cancellation date defaults
/// to "today" on the supplied time provider
pub struct BookingCancellationContextBuilder<'a> {
    booking_id: Option<BookingId>,
    total_tour_cost: Option<Money>,
    amount_paid_to_date: Option<Money>,
    cancellation_initiated_by: Option<CancellationInitiator>,
    is_no_show: bool,
    supplier_costs_committed: Money,
    booking_date: Option<NaiveDate>,
    cancellation_date: Option<NaiveDate>,
    tour_start_date: Option<NaiveDate>,
    payment_term: Option<String>,
    discount_applied: Option<Money>,
    time_provider: Option<&'a SafeTimeProvider>,
}

impl Default for BookingCancellationContextBuilder<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingCancellationContextBuilder<'static> {
    pub fn new() -> Self {
        Self {
            booking_id: None,
            total_tour_cost: None,
            amount_paid_to_date: None,
            cancellation_initiated_by: None,
            is_no_show: false,
            supplier_costs_committed: Money::ZERO,
            booking_date: None,
            cancellation_date: None,
            tour_start_date: None,
            payment_term: None,
            discount_applied: None,
            time_provider: None,
        }
    }
}

impl<'a> BookingCancellationContextBuilder<'a> {
    pub fn set_time<'b>(self, time: &'b SafeTimeProvider) -> BookingCancellationContextBuilder<'b> {
        BookingCancellationContextBuilder {
            booking_id: self.booking_id,
            total_tour_cost: self.total_tour_cost,
            amount_paid_to_date: self.amount_paid_to_date,
            cancellation_initiated_by: self.cancellation_initiated_by,
            is_no_show: self.is_no_show,
            supplier_costs_committed: self.supplier_costs_committed,
            booking_date: self.booking_date,
            cancellation_date: self.cancellation_date,
            tour_start_date: self.tour_start_date,
            payment_term: self.payment_term,
            discount_applied: self.discount_applied,
            time_provider: Some(time),
        }
    }

    pub fn booking_id(mut self, id: impl Into<BookingId>) -> Self {
        self.booking_id = Some(id.into());
        self
    }

    pub fn total_tour_cost(mut self, amount: Money) -> Self {
        self.total_tour_cost = Some(amount);
        self
    }

    pub fn amount_paid_to_date(mut self, amount: Money) -> Self {
        self.amount_paid_to_date = Some(amount);
        self
    }

    pub fn initiated_by(mut self, initiator: CancellationInitiator) -> Self {
        self.cancellation_initiated_by = Some(initiator);
        self
    }

    pub fn no_show(mut self, is_no_show: bool) -> Self {
        self.is_no_show = is_no_show;
        self
    }

    pub fn supplier_costs_committed(mut self, amount: Money) -> Self {
        self.supplier_costs_committed = amount;
        self
    }

    pub fn booking_date(mut self, date: NaiveDate) -> Self {
        self.booking_date = Some(date);
        self
    }

    pub fn cancellation_date(mut self, date: NaiveDate) -> Self {
        self.cancellation_date = Some(date);
        self
    }

    pub fn tour_start_date(mut self, date: NaiveDate) -> Self {
        self.tour_start_date = Some(date);
        self
    }

    pub fn payment_term(mut self, name: impl Into<String>) -> Self {
        self.payment_term = Some(name.into());
        self
    }

    pub fn discount_applied(mut self, amount: Money) -> Self {
        self.discount_applied = Some(amount);
        self
    }

    /// build and validate
    pub fn build(self) -> Result<BookingCancellationContext> {
        let cancellation_date = match (self.cancellation_date, self.time_provider) {
            (Some(date), _) => date,
            (None, Some(time)) => time.now().date_naive(),
            (None, None) => return Err(missing("cancellationDate")),
        };

        let tour_start_date = self.tour_start_date.ok_or_else(|| missing("tourStartDate"))?;

        let context = BookingCancellationContext {
            booking_id: self.booking_id.unwrap_or_default(),
            total_tour_cost: self.total_tour_cost.ok_or_else(|| missing("totalTourCost"))?,
            amount_paid_to_date: self.amount_paid_to_date.ok_or_else(|| missing("amountPaidToDate"))?,
            cancellation_initiated_by: self.cancellation_initiated_by,
            is_no_show: self.is_no_show,
            supplier_costs_committed: self.supplier_costs_committed,
            // bookings imported without a creation date are treated as made on
            // the cancellation date
            booking_date: self.booking_date.unwrap_or(cancellation_date),
            cancellation_date,
            tour_start_date,
            payment_term: self.payment_term,
            discount_applied: self.discount_applied,
        };

        context.validate()?;
        Ok(context)
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::InvalidDocument {
        message: format!("missing required field {field}"),
    }
}
