use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Percentage};
use crate::types::{BookingId, CancellationInitiator, CancellationScenario};

/// rule steps recorded while a decision is evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    NoShowApplied {
        booking_id: BookingId,
        amount_forfeited: Money,
    },
    WindowSelected {
        booking_id: BookingId,
        days_before_departure: i64,
        /// `None` when cancelled after every window closed
        window_days: Option<u32>,
        refund_percentage: Percentage,
    },
    BaseRefundComputed {
        booking_id: BookingId,
        amount_paid: Money,
        refund_percentage: Percentage,
        eligible_refund: Money,
    },
    InitiatorRuleApplied {
        booking_id: BookingId,
        initiator: CancellationInitiator,
        eligible_refund: Money,
    },
    SupplierCostExceptionApplied {
        booking_id: BookingId,
        supplier_costs: Money,
        eligible_before: Money,
        eligible_after: Money,
    },
    AdminFeeCharged {
        booking_id: BookingId,
        fee: Money,
    },
    TravelCreditIssued {
        booking_id: BookingId,
        amount: Money,
    },
    ScenarioClassified {
        booking_id: BookingId,
        scenario: CancellationScenario,
    },
}

/// event store for collecting events during an evaluation
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// scenario tag the evaluation ended with, if it got that far
    pub fn scenario(&self) -> Option<CancellationScenario> {
        self.events.iter().rev().find_map(|event| match event {
            Event::ScenarioClassified { scenario, .. } => Some(*scenario),
            _ => None,
        })
    }
}
