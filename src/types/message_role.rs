use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The origin of a message in the conversation log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// The message was typed by the person applying for the loan.
    User,

    /// The message came from the remote loan-assistant agent, or was
    /// generated locally on its behalf (error entries).
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Error returned when parsing an invalid message role string.
#[derive(Debug)]
pub struct MessageRoleParseError {
    /// The invalid string value that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for MessageRoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown message role: {}", self.invalid_value)
    }
}

impl std::error::Error for MessageRoleParseError {}

impl FromStr for MessageRole {
    type Err = MessageRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            _ => Err(MessageRoleParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        let json = serde_json::to_string(&MessageRole::User).unwrap();
        assert_eq!(json, r#""user""#);

        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, r#""assistant""#);
    }

    #[test]
    fn deserialization() {
        let role: MessageRole = serde_json::from_str(r#""assistant""#).unwrap();
        assert_eq!(role, MessageRole::Assistant);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("system".parse::<MessageRole>().is_err());
        assert_eq!("user".parse::<MessageRole>().unwrap(), MessageRole::User);
    }
}
