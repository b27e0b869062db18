use std::fmt;
use std::sync::mpsc;

use bytes::Bytes;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Markers the animation activates. The first marker is already active
/// when loading begins, so it never comes from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    Step2,
    Step3,
}

/// The document being submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub media_type: String,
    pub content: Bytes,
}

/// One result row as the analyze endpoint sends it. Missing or `null`
/// fields fall back to empty text and zero similarity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "Company", default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(rename = "Role", default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "Job Link", default, deserialize_with = "null_as_default")]
    pub job_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub similarity: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Matches(Vec<MatchRecord>),
    /// The server redirected; the page should navigate to `url`.
    Redirect { url: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    MarkerActivated(Marker),
    AnalysisCompleted(Result<SubmitOutcome, SubmitError>),
}

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SubmitError {
    pub kind: FailureKind,
    pub message: String,
}

impl SubmitError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be sent; the next endpoint is tried.
    Transport,
    /// The connection broke while reading the response.
    Network,
    /// Non-success status with a structured body.
    DeclaredFailure { status: u16 },
    /// Neither structured data nor a redirect.
    UnexpectedFormat,
    MalformedBody,
    TooLarge { max_bytes: u64 },
    InvalidRequest,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport failure"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::DeclaredFailure { status } => {
                write!(f, "declared failure (status {status})")
            }
            FailureKind::UnexpectedFormat => write!(f, "unexpected response format"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response too large (max {max_bytes})")
            }
            FailureKind::InvalidRequest => write!(f, "invalid request"),
        }
    }
}
