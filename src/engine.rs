use tracing::{debug, info, warn};

use crate::config::{PaymentTermConfig, TravelCreditPolicy};
use crate::context::BookingCancellationContext;
use crate::decimal::{Money, Percentage};
use crate::errors::{Result, ValidationError};
use crate::events::{Event, EventStore};
use crate::result::DecisionResult;
use crate::types::{CancellationInitiator, CancellationScenario};

/// engine deciding refunds for cancelled bookings under one payment term
#[derive(Debug, Clone)]
pub struct RefundEngine {
    terms: PaymentTermConfig,
}

impl RefundEngine {
    /// validates the payment term once up front
    pub fn new(terms: PaymentTermConfig) -> Result<Self> {
        terms.validate()?;
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &PaymentTermConfig {
        &self.terms
    }

    pub fn evaluate(&self, context: &BookingCancellationContext) -> Result<DecisionResult> {
        let mut events = EventStore::new();
        self.evaluate_with_events(context, &mut events)
    }

    /// evaluate and record each rule step that fired
    pub fn evaluate_with_events(
        &self,
        context: &BookingCancellationContext,
        events: &mut EventStore,
    ) -> Result<DecisionResult> {
        decide(context, &self.terms, events)
    }
}

/// decide the refund outcome of one cancellation
///
/// Pure: the same context and terms always give the same result. Fails only
/// when the inputs do not validate, in which case nothing is produced.
pub fn evaluate(
    context: &BookingCancellationContext,
    terms: &PaymentTermConfig,
) -> Result<DecisionResult> {
    let mut events = EventStore::new();
    terms.validate().inspect_err(|err| {
        warn!(term = %terms.name, error = %err, "payment term rejected");
    })?;
    decide(context, terms, &mut events)
}

fn decide(
    context: &BookingCancellationContext,
    terms: &PaymentTermConfig,
    events: &mut EventStore,
) -> Result<DecisionResult> {
    let initiator = check_inputs(context, terms).inspect_err(|err| {
        warn!(booking_id = %context.booking_id, error = %err, "cancellation context rejected");
    })?;

    let booking_id = &context.booking_id;
    let paid = context.amount_paid_to_date;
    let days_before_departure = context.days_before_departure();

    // no-show dominates every other rule
    let Some(initiator) = initiator.filter(|_| !context.is_no_show) else {
        debug!(booking_id = %booking_id, "no-show, nothing refunded");
        events.emit(Event::NoShowApplied {
            booking_id: booking_id.clone(),
            amount_forfeited: paid,
        });
        let outcome = Outcome {
            eligible_refund: Money::ZERO,
            admin_fee: Money::ZERO,
            scenario: CancellationScenario::NoShow,
            refund_percentage: Percentage::ZERO,
        };
        return Ok(finish(outcome, context, terms, days_before_departure, events));
    };

    let window = terms.window_for(days_before_departure);
    let window_percentage = window
        .map(|w| w.refund_percentage)
        .unwrap_or(Percentage::ZERO);
    debug!(
        booking_id = %booking_id,
        days_before_departure,
        window_days = ?window.map(|w| w.days_before_departure),
        refund_percentage = %window_percentage,
        "payment term window selected"
    );
    events.emit(Event::WindowSelected {
        booking_id: booking_id.clone(),
        days_before_departure,
        window_days: window.map(|w| w.days_before_departure),
        refund_percentage: window_percentage,
    });

    let base_refund = paid.percentage(window_percentage).min(paid);
    events.emit(Event::BaseRefundComputed {
        booking_id: booking_id.clone(),
        amount_paid: paid,
        refund_percentage: window_percentage,
        eligible_refund: base_refund,
    });

    let outcome = match initiator {
        // company-caused cancellations refund everything and never charge a fee
        CancellationInitiator::Iht => Outcome {
            eligible_refund: paid,
            admin_fee: Money::ZERO,
            scenario: CancellationScenario::FullRefundIht,
            refund_percentage: Percentage::FULL,
        },
        CancellationInitiator::Guest if base_refund.is_zero() => Outcome {
            eligible_refund: Money::ZERO,
            admin_fee: Money::ZERO,
            scenario: CancellationScenario::ZeroRefund,
            refund_percentage: window_percentage,
        },
        CancellationInitiator::Guest
            if !context.supplier_costs_committed.is_zero()
                && context.supplier_costs_committed >= base_refund =>
        {
            let reduced = base_refund.saturating_sub(context.supplier_costs_committed);
            debug!(
                booking_id = %booking_id,
                supplier_costs = %context.supplier_costs_committed,
                eligible_before = %base_refund,
                eligible_after = %reduced,
                "supplier costs absorb refund, admin fee waived"
            );
            events.emit(Event::SupplierCostExceptionApplied {
                booking_id: booking_id.clone(),
                supplier_costs: context.supplier_costs_committed,
                eligible_before: base_refund,
                eligible_after: reduced,
            });
            Outcome {
                eligible_refund: reduced,
                admin_fee: Money::ZERO,
                scenario: CancellationScenario::SupplierCostException,
                refund_percentage: window_percentage,
            }
        }
        CancellationInitiator::Guest => Outcome {
            eligible_refund: base_refund,
            admin_fee: terms.admin_fee.fee_for(base_refund),
            scenario: CancellationScenario::WindowedRefund,
            refund_percentage: window_percentage,
        },
    };

    events.emit(Event::InitiatorRuleApplied {
        booking_id: booking_id.clone(),
        initiator,
        eligible_refund: outcome.eligible_refund,
    });
    if !outcome.admin_fee.is_zero() {
        events.emit(Event::AdminFeeCharged {
            booking_id: booking_id.clone(),
            fee: outcome.admin_fee,
        });
    }

    Ok(finish(outcome, context, terms, days_before_departure, events))
}

/// validated inputs give the initiator, `None` only for no-shows
fn check_inputs(
    context: &BookingCancellationContext,
    terms: &PaymentTermConfig,
) -> Result<Option<CancellationInitiator>> {
    context.validate()?;

    if let Some(expected) = context.payment_term.as_deref() {
        if expected != terms.name {
            return Err(ValidationError::PaymentTermMismatch {
                expected: expected.to_string(),
                provided: terms.name.clone(),
            });
        }
    }

    Ok(context.cancellation_initiated_by)
}

struct Outcome {
    eligible_refund: Money,
    admin_fee: Money,
    scenario: CancellationScenario,
    refund_percentage: Percentage,
}

/// split into refundable / non-refundable, apply the credit policy and tag
fn finish(
    outcome: Outcome,
    context: &BookingCancellationContext,
    terms: &PaymentTermConfig,
    days_before_departure: i64,
    events: &mut EventStore,
) -> DecisionResult {
    let paid = context.amount_paid_to_date;
    let refundable_amount = (outcome.eligible_refund - outcome.admin_fee).min(paid);
    let non_refundable_amount = paid - refundable_amount;

    let travel_credit_issued = match (terms.travel_credit, outcome.scenario) {
        (_, CancellationScenario::NoShow) => Money::ZERO,
        (TravelCreditPolicy::CreditNonRefundable, _) => non_refundable_amount,
        (TravelCreditPolicy::Forfeit, _) => Money::ZERO,
    };
    if !travel_credit_issued.is_zero() {
        events.emit(Event::TravelCreditIssued {
            booking_id: context.booking_id.clone(),
            amount: travel_credit_issued,
        });
    }

    events.emit(Event::ScenarioClassified {
        booking_id: context.booking_id.clone(),
        scenario: outcome.scenario,
    });
    info!(
        booking_id = %context.booking_id,
        scenario = %outcome.scenario,
        eligible_refund = %outcome.eligible_refund,
        admin_fee = %outcome.admin_fee,
        refundable = %refundable_amount,
        non_refundable = %non_refundable_amount,
        travel_credit = %travel_credit_issued,
        "cancellation decided"
    );

    DecisionResult {
        eligible_refund: outcome.eligible_refund,
        refundable_amount,
        non_refundable_amount,
        admin_fee: outcome.admin_fee,
        travel_credit_issued,
        cancellation_scenario: outcome.scenario,
        refund_percentage: outcome.refund_percentage,
        days_before_departure,
    }
}
