use serde::{Deserialize, Serialize};

/// Request body for forwarding one user message to the agent service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    /// The session the message belongs to.
    pub session_id: String,

    /// The user's free-text input.
    pub message: String,
}

impl SendMessageRequest {
    /// Creates a new send-message request.
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        SendMessageRequest {
            session_id: session_id.into(),
            message: message.into(),
        }
    }
}
