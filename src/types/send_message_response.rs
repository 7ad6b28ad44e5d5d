use serde::{Deserialize, Serialize};

/// Response to a send-message request.
///
/// `response` is the assistant's reply body: free text that may carry a
/// serialized decision envelope. Interpretation happens in
/// [`ReplyPayload::parse`](crate::types::ReplyPayload::parse), not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    /// Backend-reported outcome ("success" on the happy path).
    pub status: String,

    /// The session the reply belongs to.
    pub session_id: String,

    /// The assistant's reply body, uninterpreted.
    pub response: String,

    /// Backend-reported progress percentage, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
}
