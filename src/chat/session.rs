//! Core chat session coordination.
//!
//! This module provides the `ChatSession` struct which mediates between user
//! input and the remote loan-assistant agent: it owns the ordered message
//! log, the session handle, and the derived progress/processing/error state.

use crate::client::AgentApi;
use crate::error::{Error, Result};
use crate::observability;
use crate::types::{ChatMessage, ReplyPayload, SendMessageRequest};

/// Progress gained per successful exchange.
const PROGRESS_STEP: u8 = 15;

/// Ceiling for client-computed progress until a decision arrives.
const PROGRESS_CAP: u8 = 95;

/// Progress once a bureau decision is attached.
const PROGRESS_DONE: u8 = 100;

/// A chat session that coordinates between user input and the agent service.
///
/// The session lazily acquires a handle from the backend on the first send,
/// keeps an append-only message log, and opportunistically interprets
/// assistant replies as decision envelopes. Every remote failure degrades to
/// a locally appended error entry and leaves the session interactive;
/// nothing here is fatal.
///
/// `send` takes `&mut self` and is awaited to completion, so there is never
/// more than one in-flight request per session.
pub struct ChatSession<A: AgentApi> {
    api: A,
    session_id: Option<String>,
    messages: Vec<ChatMessage>,
    next_message_id: u64,
    progress: u8,
    processing: bool,
    connection_error: bool,
    decided: bool,
}

/// A point-in-time view of session state for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The backend-issued session handle, once acquired.
    pub session_id: Option<String>,
    /// Number of entries in the message log.
    pub message_count: usize,
    /// Client-computed progress percentage.
    pub progress: u8,
    /// True while a request is in flight.
    pub processing: bool,
    /// True after a remote failure, until the next successful call.
    pub connection_error: bool,
    /// True once a bureau decision has been attached.
    pub decided: bool,
}

impl<A: AgentApi> ChatSession<A> {
    /// Creates a new session over the given API implementation.
    ///
    /// No network traffic happens until the first send.
    pub fn new(api: A) -> Self {
        Self {
            api,
            session_id: None,
            messages: Vec::new(),
            next_message_id: 0,
            progress: 0,
            processing: false,
            connection_error: false,
            decided: false,
        }
    }

    /// Mutable access to the underlying API implementation.
    ///
    /// The REPL uses this to swap credentials after a login or logout.
    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    /// The backend-issued session handle, once acquired.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// The ordered, append-only message log.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Client-computed progress percentage.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// True while a request is in flight.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// True after a remote failure, until the next successful call.
    pub fn has_connection_error(&self) -> bool {
        self.connection_error
    }

    /// True once a bureau decision has been attached to a message.
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    /// Returns a snapshot of session state for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            message_count: self.messages.len(),
            progress: self.progress,
            processing: self.processing,
            connection_error: self.connection_error,
            decided: self.decided,
        }
    }

    /// Starts a session eagerly, without sending a message.
    ///
    /// `send` does this lazily; calling it up front lets the UI show the
    /// handle (and record it in history) before the first message. Safe to
    /// retry: a failed attempt leaves no handle behind, and a repeated call
    /// simply requests a new one.
    pub async fn start(&mut self) -> Result<&str> {
        if self.session_id.is_none() {
            self.acquire_session().await?;
        }
        Ok(self.session_id.as_deref().unwrap_or_default())
    }

    /// Resumes a previously recorded session after validating the handle
    /// with the backend.
    ///
    /// The backend does not replay transcripts, so the local log and
    /// progress restart empty; only the handle carries over.
    pub async fn resume(&mut self, session_id: &str) -> Result<()> {
        self.processing = true;
        let status = self.api.session_status(session_id).await;
        self.processing = false;
        match status {
            Ok(_) => {
                self.session_id = Some(session_id.to_string());
                self.messages.clear();
                self.next_message_id = 0;
                self.progress = 0;
                self.connection_error = false;
                self.decided = false;
                Ok(())
            }
            Err(err) => {
                if err.is_retryable() {
                    self.connection_error = true;
                }
                Err(err)
            }
        }
    }

    /// Discards the conversation if `session_id` is the active handle.
    ///
    /// Used when a session is deleted from history: a deleted session must
    /// not stay active. Returns true if the conversation was discarded.
    pub fn clear_if_active(&mut self, session_id: &str) -> bool {
        if self.session_id.as_deref() == Some(session_id) {
            self.reset();
            true
        } else {
            false
        }
    }

    /// Discards the current conversation and handle.
    ///
    /// The next send will acquire a fresh session.
    pub fn reset(&mut self) {
        self.session_id = None;
        self.messages.clear();
        self.next_message_id = 0;
        self.progress = 0;
        self.processing = false;
        self.connection_error = false;
        self.decided = false;
    }

    /// Sends a user message and appends the assistant's reply to the log.
    ///
    /// The user's text is appended optimistically before the network is
    /// touched; a session handle is acquired first when none exists. On any
    /// remote failure a locally generated error entry is appended and the
    /// error is returned; retryable failures additionally set the
    /// connection-error flag. The session stays interactive and the user
    /// may retry.
    ///
    /// Empty or whitespace-only input is rejected before any network call
    /// and appends nothing.
    ///
    /// Returns the appended assistant message.
    pub async fn send(&mut self, input: &str) -> Result<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return Err(Error::validation(
                "message must not be empty",
                Some("message".to_string()),
            ));
        }

        let user_id = self.next_id();
        self.messages.push(ChatMessage::user(user_id, text));

        self.processing = true;
        let outcome = self.exchange(text).await;
        self.processing = false;

        match outcome {
            Ok(message) => {
                self.connection_error = false;
                self.messages.push(message);
                Ok(self.messages.last().expect("message was just pushed"))
            }
            Err(err) => {
                let error_id = self.next_id();
                self.messages.push(ChatMessage::error(
                    error_id,
                    format!("Unable to reach the loan assistant: {err}"),
                ));
                // Only retryable failures mean the connection is suspect; an
                // expired token or a bad request is not a connectivity
                // problem.
                if err.is_retryable() {
                    self.connection_error = true;
                }
                Err(err)
            }
        }
    }

    async fn exchange(&mut self, text: &str) -> Result<ChatMessage> {
        if self.session_id.is_none() {
            self.acquire_session_inner().await?;
        }
        let session_id = self
            .session_id
            .clone()
            .expect("session handle exists after acquisition");

        let request = SendMessageRequest::new(session_id, text);
        let response = self.api.send_message(request).await?;

        let payload = ReplyPayload::parse(&response.response);
        let message_id = self.next_id();
        let message = match payload {
            ReplyPayload::Plain(body) => {
                observability::ENVELOPE_FALLBACKS.click();
                self.advance_progress(response.progress);
                ChatMessage::assistant(message_id, body)
            }
            ReplyPayload::Envelope(envelope) => {
                observability::DECISIONS_RECEIVED.click();
                self.decided = true;
                self.progress = PROGRESS_DONE;
                ChatMessage::assistant(message_id, envelope.message)
                    .with_decision(envelope.decision)
            }
        };
        Ok(message)
    }

    async fn acquire_session(&mut self) -> Result<()> {
        self.processing = true;
        let outcome = self.acquire_session_inner().await;
        self.processing = false;
        if let Err(err) = outcome {
            let error_id = self.next_id();
            self.messages.push(ChatMessage::error(
                error_id,
                format!("Unable to start a conversation: {err}"),
            ));
            if err.is_retryable() {
                self.connection_error = true;
            }
            return Err(err);
        }
        self.connection_error = false;
        Ok(())
    }

    async fn acquire_session_inner(&mut self) -> Result<()> {
        let created = self.api.create_session().await?;
        self.session_id = Some(created.session_id);
        Ok(())
    }

    /// Advances progress for a decision-free exchange.
    ///
    /// The larger of the fixed per-exchange step and the backend-reported
    /// value wins, clamped below full; progress never decreases.
    fn advance_progress(&mut self, reported: Option<u8>) {
        let stepped = self.progress.saturating_add(PROGRESS_STEP);
        let candidate = stepped.max(reported.unwrap_or(0)).min(PROGRESS_CAP);
        self.progress = self.progress.max(candidate);
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }
}
