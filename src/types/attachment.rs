use serde::{Deserialize, Serialize};

/// A file attached to a chat message (treatment proof, PAN card scan).
///
/// The coordinator never interprets attachment bytes; it only records the
/// backend-issued reference so the UI can link to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Backend-issued identifier for the uploaded file.
    pub file_id: String,

    /// Display name of the file.
    pub file_name: String,

    /// MIME type, when the backend reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl Attachment {
    /// Creates a new attachment reference.
    pub fn new(file_id: impl Into<String>, file_name: impl Into<String>) -> Self {
        Attachment {
            file_id: file_id.into(),
            file_name: file_name.into(),
            content_type: None,
        }
    }
}
