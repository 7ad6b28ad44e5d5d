use serde::{Deserialize, Serialize};

/// Response to a session-status probe.
///
/// The probe validates a resumed session handle; it does not retrieve
/// transcript history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatusResponse {
    /// Backend-reported outcome ("success" on the happy path).
    pub status: String,

    /// The probed session handle.
    pub session_id: String,

    /// Lifecycle state of the session ("active", "completed", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_status: Option<String>,

    /// Backend-side user identifier bound to the session, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization() {
        let json = r#"{
            "status": "success",
            "session_id": "S1",
            "session_status": "active",
            "user_id": "u-77"
        }"#;
        let response: SessionStatusResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.session_status.as_deref(), Some("active"));
        assert_eq!(response.user_id.as_deref(), Some("u-77"));
    }
}
