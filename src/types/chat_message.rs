use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::attachment::Attachment;
use crate::types::bureau_decision::BureauDecision;
use crate::types::message_role::MessageRole;
use crate::utils::rfc3339;

/// One entry in the ordered conversation log.
///
/// Messages are created when the user submits input, when a reply arrives,
/// or when a remote call fails and an error entry stands in for the reply.
/// They are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Log-local identifier, monotonically assigned by the coordinator.
    pub id: u64,

    /// Who the message came from.
    pub role: MessageRole,

    /// The visible text of the message.
    pub text: String,

    /// When the message was appended to the log.
    #[serde(with = "rfc3339")]
    pub timestamp: OffsetDateTime,

    /// Files attached to the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    /// The bureau decision attached to this message, at most one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<BureauDecision>,

    /// True when this entry was generated locally to report a failed
    /// remote call, rather than received from the backend.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ChatMessage {
    /// Creates a user message.
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        ChatMessage {
            id,
            role: MessageRole::User,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            attachments: Vec::new(),
            decision: None,
            is_error: false,
        }
    }

    /// Creates an assistant message.
    pub fn assistant(id: u64, text: impl Into<String>) -> Self {
        ChatMessage {
            id,
            role: MessageRole::Assistant,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            attachments: Vec::new(),
            decision: None,
            is_error: false,
        }
    }

    /// Creates a locally generated error entry.
    pub fn error(id: u64, text: impl Into<String>) -> Self {
        ChatMessage {
            id,
            role: MessageRole::Assistant,
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            attachments: Vec::new(),
            decision: None,
            is_error: true,
        }
    }

    /// Attaches a bureau decision to the message.
    pub fn with_decision(mut self, decision: BureauDecision) -> Self {
        self.decision = Some(decision);
        self
    }
}
