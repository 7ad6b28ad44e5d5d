//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to manage sessions and credentials without sending
//! messages to the agent.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Start a fresh conversation with a new session.
    New,

    /// Resume a previously recorded session by handle.
    Resume(String),

    /// List locally recorded sessions.
    History,

    /// Delete a recorded session from local history.
    Delete(String),

    /// Show application progress and session state.
    Status,

    /// Log in with a phone number and one-time password.
    Login,

    /// Discard stored credentials.
    Logout,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use careline::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/resume S1").is_some());
/// assert!(parse_command("I need a loan for surgery").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::New,
        "resume" => match argument {
            Some(session_id) => ChatCommand::Resume(session_id.to_string()),
            None => ChatCommand::Invalid("/resume requires a session id".to_string()),
        },
        "history" | "sessions" => ChatCommand::History,
        "delete" => match argument {
            Some(session_id) => ChatCommand::Delete(session_id.to_string()),
            None => ChatCommand::Invalid("/delete requires a session id".to_string()),
        },
        "status" | "progress" => ChatCommand::Status,
        "login" => ChatCommand::Login,
        "logout" => ChatCommand::Logout,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        unknown => ChatCommand::Invalid(format!(
            "unknown command: /{unknown} (try /help)"
        )),
    };

    Some(result)
}

/// Returns the help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a fresh conversation
  /resume <session-id>   Resume a recorded session
  /history               List recorded sessions
  /delete <session-id>   Remove a session from local history
  /status                Show progress and session state
  /login                 Log in with phone number and OTP
  /logout                Discard stored credentials
  /help                  Show this help message
  /quit                  Exit the chat"#
}
