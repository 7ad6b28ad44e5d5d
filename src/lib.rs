// Public modules
pub mod auth;
pub mod chat;
pub mod client;
pub mod error;
pub mod history;
pub mod observability;
pub mod render;
pub mod types;
pub mod utils;

// Re-exports
pub use auth::{CredentialStore, Credentials, MAX_NEW_CHATS_BEFORE_REAUTH};
pub use client::{AgentApi, AgentClient};
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use observability::register_biometrics;
pub use render::PlainTextRenderer;
pub use types::*;
