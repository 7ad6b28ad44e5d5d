// Public modules
pub mod attachment;
pub mod bureau_decision;
pub mod chat_message;
pub mod decision_status;
pub mod emi_plan;
pub mod message_role;
pub mod reply_payload;
pub mod send_message_request;
pub mod send_message_response;
pub mod send_otp;
pub mod session_create_response;
pub mod session_status_response;
pub mod verify_otp;

// Re-exports
pub use attachment::Attachment;
pub use bureau_decision::BureauDecision;
pub use chat_message::ChatMessage;
pub use decision_status::DecisionStatus;
pub use emi_plan::EmiPlan;
pub use message_role::{MessageRole, MessageRoleParseError};
pub use reply_payload::{DecisionEnvelope, ReplyPayload};
pub use send_message_request::SendMessageRequest;
pub use send_message_response::SendMessageResponse;
pub use send_otp::{SendOtpRequest, SendOtpResponse};
pub use session_create_response::SessionCreateResponse;
pub use session_status_response::SessionStatusResponse;
pub use verify_otp::{VerifyOtpRequest, VerifyOtpResponse};
