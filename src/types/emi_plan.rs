use serde::{Deserialize, Serialize};

/// One repayment plan offered as part of a bureau decision.
///
/// The backend serializes monetary amounts as strings; they are kept as
/// strings here and only parsed when a numeric comparison is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmiPlan {
    /// Identifier of the credit product backing this plan, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Monthly installment amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emi: Option<String>,

    /// Number of installments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_emi: Option<u32>,

    /// Up-front payment required before disbursal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<String>,

    /// Loan principal net of the down payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_loan_amount: Option<String>,

    /// Credit limit computed for this plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_limit_calculated: Option<String>,

    /// Largest treatment amount this plan can cover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_treatment_amount: Option<String>,
}

impl EmiPlan {
    /// The monthly installment as a number, when present and parseable.
    pub fn emi_amount(&self) -> Option<f64> {
        parse_amount(self.emi.as_deref()?)
    }

    /// The covered treatment amount as a number, when present and parseable.
    pub fn treatment_amount(&self) -> Option<f64> {
        parse_amount(self.gross_treatment_amount.as_deref()?)
    }
}

/// Parses a backend monetary string, tolerating separators and a currency
/// prefix ("₹1,20,000" and "120000.0" both parse).
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_camel_case() {
        let json = r#"{
            "productId": "p-12",
            "emi": "4500",
            "totalEmi": 12,
            "downPayment": "5000",
            "netLoanAmount": "49000",
            "creditLimitCalculated": "120000",
            "grossTreatmentAmount": "54000"
        }"#;
        let plan: EmiPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.product_id.as_deref(), Some("p-12"));
        assert_eq!(plan.total_emi, Some(12));
        assert_eq!(plan.emi_amount(), Some(4500.0));
        assert_eq!(plan.treatment_amount(), Some(54000.0));
    }

    #[test]
    fn sparse_plan_deserializes() {
        let plan: EmiPlan = serde_json::from_str(r#"{"emi": "3200"}"#).unwrap();
        assert_eq!(plan.emi.as_deref(), Some("3200"));
        assert!(plan.down_payment.is_none());
    }

    #[test]
    fn amount_parsing_tolerates_formatting() {
        assert_eq!(parse_amount("₹1,20,000"), Some(120000.0));
        assert_eq!(parse_amount("4500.50"), Some(4500.5));
        assert_eq!(parse_amount("n/a"), None);
    }
}
