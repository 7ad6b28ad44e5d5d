use serde::{Deserialize, Serialize};

/// Request to send a one-time code to a phone number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendOtpRequest {
    /// The phone number to send the code to.
    pub phone_number: String,
}

impl SendOtpRequest {
    /// Creates a new send-OTP request.
    pub fn new(phone_number: impl Into<String>) -> Self {
        SendOtpRequest {
            phone_number: phone_number.into(),
        }
    }
}

/// Acknowledgement that a one-time code was dispatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendOtpResponse {
    /// Human-readable acknowledgement.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        let request = SendOtpRequest::new("9876543210");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"phone_number":"9876543210"}"#);
    }

    #[test]
    fn deserialization() {
        let json = r#"{"message": "OTP sent successfully"}"#;
        let response: SendOtpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.message, "OTP sent successfully");
    }
}
