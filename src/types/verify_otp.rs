use serde::{Deserialize, Serialize};

/// Request to exchange a one-time code for a bearer credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    /// The phone number the code was sent to.
    pub phone_number: String,

    /// The one-time code the user received.
    pub otp: String,
}

impl VerifyOtpRequest {
    /// Creates a new verify-OTP request.
    pub fn new(phone_number: impl Into<String>, otp: impl Into<String>) -> Self {
        VerifyOtpRequest {
            phone_number: phone_number.into(),
            otp: otp.into(),
        }
    }
}

/// Successful OTP verification: the bearer credential plus subject metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    /// Human-readable acknowledgement.
    pub message: String,

    /// The bearer credential to attach to authenticated calls.
    pub token: String,

    /// The verified phone number.
    pub phone_number: String,

    /// Backend-side user identifier, when issued.
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization() {
        let request = VerifyOtpRequest::new("9876543210", "4821");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"phone_number":"9876543210","otp":"4821"}"#);
    }

    #[test]
    fn response_deserialization() {
        let json = r#"{
            "message": "OTP verified successfully",
            "token": "jwt-abc",
            "phone_number": "9876543210",
            "userId": "u-77"
        }"#;
        let response: VerifyOtpResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token, "jwt-abc");
        assert_eq!(response.user_id.as_deref(), Some("u-77"));
    }

    #[test]
    fn response_without_user_id() {
        let json = r#"{"message": "ok", "token": "t", "phone_number": "9"}"#;
        let response: VerifyOtpResponse = serde_json::from_str(json).unwrap();
        assert!(response.user_id.is_none());
    }
}
