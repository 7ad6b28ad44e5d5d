use serde::{Deserialize, Serialize};

use crate::types::decision_status::DecisionStatus;
use crate::types::emi_plan::{EmiPlan, parse_amount};

/// A bureau loan decision extracted from an assistant reply.
///
/// Field names follow the backend's camelCase wire format. Every field
/// except the status is optional; rejected and pending decisions routinely
/// omit the plan fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BureauDecision {
    /// Outcome of the decision.
    pub status: DecisionStatus,

    /// Why the application was rejected or held, when the backend says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// The largest monthly installment the applicant qualifies for.
    #[serde(rename = "maxEligibleEMI", skip_serializing_if = "Option::is_none")]
    pub max_eligible_emi: Option<String>,

    /// Repayment plans offered with the decision.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emi_plans: Vec<EmiPlan>,

    /// Credit limit computed across the offered plans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit_calculated: Option<String>,

    /// Requested loan principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<String>,

    /// The largest treatment amount the decision can cover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_treatment_amount: Option<String>,
}

impl BureauDecision {
    /// Creates a decision carrying only a status.
    pub fn with_status(status: DecisionStatus) -> Self {
        BureauDecision {
            status,
            reason: None,
            max_eligible_emi: None,
            emi_plans: Vec::new(),
            credit_limit_calculated: None,
            loan_amount: None,
            max_treatment_amount: None,
        }
    }

    /// The covered treatment ceiling as a number.
    ///
    /// Falls back to the highest `grossTreatmentAmount` across the offered
    /// plans when the top-level field is absent.
    pub fn treatment_ceiling(&self) -> Option<f64> {
        if let Some(raw) = self.max_treatment_amount.as_deref()
            && let Some(amount) = parse_amount(raw)
        {
            return Some(amount);
        }
        self.emi_plans
            .iter()
            .filter_map(EmiPlan::treatment_amount)
            .fold(None, |best, amount| match best {
                Some(b) if b >= amount => Some(b),
                _ => Some(amount),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_decision_deserializes() {
        let json = r#"{
            "status": "APPROVED",
            "maxEligibleEMI": "5200",
            "emiPlans": [
                {"emi": "4500", "grossTreatmentAmount": "54000"},
                {"emi": "5200", "grossTreatmentAmount": "62000"}
            ],
            "maxTreatmentAmount": "62000"
        }"#;
        let decision: BureauDecision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.status, DecisionStatus::Approved);
        assert_eq!(decision.emi_plans.len(), 2);
        assert_eq!(decision.treatment_ceiling(), Some(62000.0));
    }

    #[test]
    fn rejected_decision_with_reason() {
        let json = r#"{"status": "REJECTED", "reason": "Failed PAN check"}"#;
        let decision: BureauDecision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.status, DecisionStatus::Rejected);
        assert_eq!(decision.reason.as_deref(), Some("Failed PAN check"));
        assert!(decision.emi_plans.is_empty());
        assert!(decision.treatment_ceiling().is_none());
    }

    #[test]
    fn ceiling_falls_back_to_plans() {
        let json = r#"{
            "status": "APPROVED",
            "emiPlans": [
                {"grossTreatmentAmount": "30000"},
                {"grossTreatmentAmount": "45000"}
            ]
        }"#;
        let decision: BureauDecision = serde_json::from_str(json).unwrap();
        assert_eq!(decision.treatment_ceiling(), Some(45000.0));
    }

    #[test]
    fn serialization_skips_empty_fields() {
        let decision = BureauDecision::with_status(DecisionStatus::Pending);
        let json = serde_json::to_string(&decision).unwrap();
        assert_eq!(json, r#"{"status":"PENDING"}"#);
    }
}
