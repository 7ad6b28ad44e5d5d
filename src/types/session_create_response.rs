use serde::{Deserialize, Serialize};

/// Response to a session-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCreateResponse {
    /// Backend-reported outcome ("success" on the happy path).
    pub status: String,

    /// The opaque session handle to use for subsequent messages.
    pub session_id: String,
}
