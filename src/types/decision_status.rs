use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of a bureau loan decision.
///
/// The backend reports these in SCREAMING_SNAKE_CASE; unknown values are
/// preserved verbatim in the `Other` variant rather than failing the parse,
/// since new statuses appear on the backend without coordination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionStatus {
    /// The loan application was approved.
    Approved,

    /// The loan application was rejected.
    Rejected,

    /// The bureau wants proof of income before deciding.
    IncomeVerificationRequired,

    /// No decision has been reached yet.
    Pending,

    /// A status string this client does not know about.
    Other(String),
}

impl DecisionStatus {
    /// Returns true if the decision approves the application.
    pub fn is_approved(&self) -> bool {
        matches!(self, DecisionStatus::Approved)
    }

    /// Returns true if the decision is terminal (approved or rejected).
    pub fn is_final(&self) -> bool {
        matches!(self, DecisionStatus::Approved | DecisionStatus::Rejected)
    }
}

impl fmt::Display for DecisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecisionStatus::Approved => write!(f, "APPROVED"),
            DecisionStatus::Rejected => write!(f, "REJECTED"),
            DecisionStatus::IncomeVerificationRequired => {
                write!(f, "INCOME_VERIFICATION_REQUIRED")
            }
            DecisionStatus::Pending => write!(f, "PENDING"),
            DecisionStatus::Other(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for DecisionStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Statuses arrive in inconsistent case from different backend paths.
        Ok(match s.to_ascii_uppercase().as_str() {
            "APPROVED" => DecisionStatus::Approved,
            "REJECTED" => DecisionStatus::Rejected,
            "INCOME_VERIFICATION_REQUIRED" => DecisionStatus::IncomeVerificationRequired,
            "PENDING" => DecisionStatus::Pending,
            _ => DecisionStatus::Other(s.to_string()),
        })
    }
}

impl From<String> for DecisionStatus {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(DecisionStatus::Other(s))
    }
}

impl From<DecisionStatus> for String {
    fn from(status: DecisionStatus) -> Self {
        status.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        let json = serde_json::to_string(&DecisionStatus::Approved).unwrap();
        assert_eq!(json, r#""APPROVED""#);

        let json = serde_json::to_string(&DecisionStatus::IncomeVerificationRequired).unwrap();
        assert_eq!(json, r#""INCOME_VERIFICATION_REQUIRED""#);
    }

    #[test]
    fn deserialization_is_case_insensitive() {
        let status: DecisionStatus = serde_json::from_str(r#""approved""#).unwrap();
        assert_eq!(status, DecisionStatus::Approved);

        let status: DecisionStatus = serde_json::from_str(r#""Rejected""#).unwrap();
        assert_eq!(status, DecisionStatus::Rejected);
    }

    #[test]
    fn unknown_status_preserved() {
        let status: DecisionStatus = serde_json::from_str(r#""ON_HOLD""#).unwrap();
        assert_eq!(status, DecisionStatus::Other("ON_HOLD".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""ON_HOLD""#);
    }

    #[test]
    fn finality() {
        assert!(DecisionStatus::Approved.is_final());
        assert!(DecisionStatus::Rejected.is_final());
        assert!(!DecisionStatus::Pending.is_final());
        assert!(!DecisionStatus::IncomeVerificationRequired.is_final());
    }
}
