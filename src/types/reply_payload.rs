use serde::{Deserialize, Serialize};

use crate::types::bureau_decision::BureauDecision;

/// A decision envelope embedded as serialized JSON inside an otherwise
/// free-text assistant reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEnvelope {
    /// The text the user should see in place of the raw body.
    pub message: String,

    /// The bureau decision carried alongside the text.
    pub decision: BureauDecision,
}

/// The interpreted body of an assistant reply.
///
/// Assistant replies are free text that may or may not carry a serialized
/// [`DecisionEnvelope`]. [`ReplyPayload::parse`] is the single place that
/// distinction is made; everything downstream matches on the variant instead
/// of re-parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPayload {
    /// The reply is ordinary text, shown as-is.
    Plain(String),

    /// The reply carried a decision envelope.
    Envelope(DecisionEnvelope),
}

impl ReplyPayload {
    /// Interprets a raw reply body.
    ///
    /// Attempts to parse the body as a [`DecisionEnvelope`]; any body that
    /// is not valid JSON of exactly that shape degrades to
    /// [`ReplyPayload::Plain`] with the body untouched. Parse failure is
    /// never an error.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<DecisionEnvelope>(body.trim()) {
            Ok(envelope) => ReplyPayload::Envelope(envelope),
            Err(_) => ReplyPayload::Plain(body.to_string()),
        }
    }

    /// The text a user should see for this payload.
    pub fn display_text(&self) -> &str {
        match self {
            ReplyPayload::Plain(text) => text,
            ReplyPayload::Envelope(envelope) => &envelope.message,
        }
    }

    /// The attached decision, if the payload carried one.
    pub fn decision(&self) -> Option<&BureauDecision> {
        match self {
            ReplyPayload::Plain(_) => None,
            ReplyPayload::Envelope(envelope) => Some(&envelope.decision),
        }
    }
}
