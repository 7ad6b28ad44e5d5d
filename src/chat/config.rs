//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;
use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

/// Default directory name for local state (history, credentials).
const STATE_DIR_NAME: &str = ".careline";

/// File name for the chat history index inside the state directory.
const HISTORY_FILE_NAME: &str = "history.json";

/// File name for stored credentials inside the state directory.
const CREDENTIALS_FILE_NAME: &str = "credentials.json";

/// Command-line arguments for the careline-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the agent service.
    #[arrrg(optional, "Base URL of the agent service", "URL")]
    pub base_url: Option<String>,

    /// Phone number to log in with, skipping the interactive prompt.
    #[arrrg(optional, "Phone number to log in with", "PHONE")]
    pub phone: Option<String>,

    /// Directory for local state (history, credentials).
    #[arrrg(optional, "Directory for local state (default: ~/.careline)", "DIR")]
    pub state_dir: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 30)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for the chat application.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL of the agent service.
    pub base_url: String,

    /// Phone number supplied up front, if any.
    pub phone_number: Option<String>,

    /// Directory for local state files.
    pub state_dir: PathBuf,

    /// Request timeout.
    pub timeout: Duration,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: the hosted agent service
    /// - State dir: `~/.careline` (or `./.careline` without a home)
    /// - Timeout: 30 seconds
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            phone_number: None,
            state_dir: default_state_dir(),
            timeout: DEFAULT_TIMEOUT,
            use_color: true,
        }
    }

    /// Sets the base URL of the agent service.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the phone number to log in with.
    pub fn with_phone_number(mut self, phone_number: String) -> Self {
        self.phone_number = Some(phone_number);
        self
    }

    /// Sets the state directory.
    pub fn with_state_dir(mut self, state_dir: PathBuf) -> Self {
        self.state_dir = state_dir;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Path of the chat history index file.
    pub fn history_path(&self) -> PathBuf {
        self.state_dir.join(HISTORY_FILE_NAME)
    }

    /// Path of the stored-credentials file.
    pub fn credentials_path(&self) -> PathBuf {
        self.state_dir.join(CREDENTIALS_FILE_NAME)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            base_url: args
                .base_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            phone_number: args.phone,
            state_dir: args
                .state_dir
                .map(PathBuf::from)
                .unwrap_or_else(default_state_dir),
            timeout: args.timeout.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT),
            use_color: !args.no_color,
        }
    }
}

fn default_state_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(STATE_DIR_NAME),
        None => PathBuf::from(STATE_DIR_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.phone_number.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.use_color);
        assert!(config.state_dir.ends_with(".careline"));
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert!(config.use_color);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("https://staging.careline.example/api/".to_string()),
            phone: Some("9876543210".to_string()),
            state_dir: Some("/tmp/careline-state".to_string()),
            timeout: Some(5),
            no_color: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url, "https://staging.careline.example/api/");
        assert_eq!(config.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(config.state_dir, PathBuf::from("/tmp/careline-state"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.use_color);
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://localhost:8000/api/".to_string())
            .with_phone_number("9876543210".to_string())
            .with_state_dir(PathBuf::from("/tmp/state"))
            .with_timeout(Duration::from_secs(10))
            .without_color();
        assert_eq!(config.base_url, "http://localhost:8000/api/");
        assert_eq!(config.phone_number.as_deref(), Some("9876543210"));
        assert_eq!(config.history_path(), PathBuf::from("/tmp/state/history.json"));
        assert_eq!(
            config.credentials_path(),
            PathBuf::from("/tmp/state/credentials.json")
        );
        assert!(!config.use_color);
    }
}
