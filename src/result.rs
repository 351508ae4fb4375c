use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::context::BookingCancellationContext;
use crate::decimal::{Money, Percentage};
use crate::types::CancellationScenario;

/// outcome of evaluating one cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionResult {
    /// what the guest is owed before the admin fee comes off
    pub eligible_refund: Money,
    /// cash going back to the guest
    pub refundable_amount: Money,
    pub non_refundable_amount: Money,
    pub admin_fee: Money,
    pub travel_credit_issued: Money,
    pub cancellation_scenario: CancellationScenario,
    /// effective refund percentage: the window's, 100 for agency cancellations
    pub refund_percentage: Percentage,
    pub days_before_departure: i64,
}

impl DecisionResult {
    /// refundable plus non-refundable, always equal to the amount paid
    pub fn total_accounted(&self) -> Money {
        self.refundable_amount + self.non_refundable_amount
    }

    /// check the result invariants against the amount that was paid
    pub fn is_consistent(&self, amount_paid_to_date: Money) -> bool {
        self.total_accounted() == amount_paid_to_date
            && self.eligible_refund <= amount_paid_to_date
            && self.admin_fee <= self.eligible_refund
            && !self.refundable_amount.is_negative()
            && !self.non_refundable_amount.is_negative()
            && !self.travel_credit_issued.is_negative()
    }

    /// fields to write back onto the booking document
    pub fn booking_update(&self, context: &BookingCancellationContext) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("eligibleRefund".into(), json!(self.eligible_refund));
        fields.insert("refundableAmount".into(), json!(self.refundable_amount));
        fields.insert("nonRefundableAmount".into(), json!(self.non_refundable_amount));
        fields.insert("adminFee".into(), json!(self.admin_fee));
        fields.insert("travelCreditIssued".into(), json!(self.travel_credit_issued));
        fields.insert("cancellationScenario".into(), json!(self.cancellation_scenario));
        fields.insert(
            "cancellationInitiatedBy".into(),
            json!(context.cancellation_initiated_by.map(|i| i.as_str()).unwrap_or("")),
        );
        fields.insert("supplierCostsCommitted".into(), json!(context.supplier_costs_committed));
        fields.insert("isNoShow".into(), json!(context.is_no_show));
        fields
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
