//! Credential persistence for the OTP login flow.
//!
//! The login protocol itself (phone number → one-time code → verified token)
//! is owned by the backend; this module only persists the resulting bearer
//! credential and decides when it must be refreshed. The store is an
//! explicitly passed capability object, not ambient global state: whoever
//! needs the credential takes a reference to the store.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};

use crate::error::{Error, Result};
use crate::types::VerifyOtpResponse;

/// New chats allowed per login before the user must re-authenticate.
pub const MAX_NEW_CHATS_BEFORE_REAUTH: u32 = 7;

/// A persisted bearer credential and its subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// The bearer token attached to authenticated calls.
    pub token: String,

    /// The verified phone number the token was issued for.
    pub phone_number: String,

    /// Backend-side user identifier, when issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// New chats started under this credential.
    #[serde(default)]
    pub new_chat_count: u32,
}

#[derive(Serialize, Deserialize)]
struct CredentialFile {
    version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

/// File-backed credential store.
///
/// Mutations are written through to disk immediately, mirroring
/// [`HistoryStore`](crate::history::HistoryStore).
pub struct CredentialStore {
    path: PathBuf,
    credentials: Option<Credentials>,
}

impl CredentialStore {
    /// Opens the store at `path`, creating an empty one if the file does
    /// not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let credentials = if path.exists() {
            let file = File::open(&path)
                .map_err(|err| Error::io("failed to open credential file", err))?;
            let reader = BufReader::new(file);
            let parsed: CredentialFile = from_reader(reader).map_err(|err| {
                Error::serialization("failed to parse credential file", Some(Box::new(err)))
            })?;
            parsed.credentials
        } else {
            None
        };
        Ok(Self { path, credentials })
    }

    /// The stored credential, if the user is logged in.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// The stored bearer token, if the user is logged in.
    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    /// Returns true if a credential is present and its new-chat allowance
    /// is not exhausted.
    pub fn is_authenticated(&self) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|c| c.new_chat_count < MAX_NEW_CHATS_BEFORE_REAUTH)
    }

    /// Stores the credential issued by a successful OTP verification,
    /// resetting the new-chat allowance.
    pub fn login(&mut self, verified: &VerifyOtpResponse) -> Result<()> {
        self.credentials = Some(Credentials {
            token: verified.token.clone(),
            phone_number: verified.phone_number.clone(),
            user_id: verified.user_id.clone(),
            new_chat_count: 0,
        });
        self.save()
    }

    /// Discards the stored credential.
    ///
    /// Purely local; the backend is not notified.
    pub fn logout(&mut self) -> Result<()> {
        self.credentials = None;
        self.save()
    }

    /// Counts a new chat against the credential's allowance.
    ///
    /// Returns true when the allowance is exhausted and the user must log
    /// in again before the next chat.
    pub fn note_new_chat(&mut self) -> Result<bool> {
        let Some(credentials) = self.credentials.as_mut() else {
            return Ok(true);
        };
        credentials.new_chat_count = credentials.new_chat_count.saturating_add(1);
        let exhausted = credentials.new_chat_count >= MAX_NEW_CHATS_BEFORE_REAUTH;
        self.save()?;
        Ok(exhausted)
    }

    fn save(&self) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|err| Error::io("failed to create credential file", err))?;
        let writer = BufWriter::new(file);
        let contents = CredentialFile {
            version: 1,
            credentials: self.credentials.clone(),
        };
        to_writer_pretty(writer, &contents).map_err(|err| {
            Error::serialization("failed to serialize credential file", Some(Box::new(err)))
        })
    }
}
