//! Chat application module for interactive conversations with the loan
//! assistant.
//!
//! This module provides the REPL chat interface built on top of the careline
//! client library. It supports:
//!
//! - Lazy session creation and session resumption
//! - Bureau decision summaries attached to replies
//! - Slash commands for session and credential control
//! - A locally persisted history of past sessions
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and agent interaction
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod session;

pub use crate::render::PlainTextRenderer;
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatSession, SessionSnapshot};
