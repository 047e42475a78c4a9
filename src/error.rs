//! Error taxonomy shared by the feed, live channel, and settings engine.

use thiserror::Error;

use crate::model::{Setting, SettingValue};

/// Failure of any request against the remote store.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{op}: unauthorized (session token invalid or expired)")]
    Unauthorized { op: String },

    #[error("{op}: forbidden (insufficient permissions)")]
    Forbidden { op: String },

    #[error("{op}: not found")]
    NotFound { op: String },

    #[error("{op}: remote returned status {status}")]
    Status { op: String, status: u16 },

    #[error("{op}: request failed: {message}")]
    Request { op: String, message: String },

    #[error("{op}: invalid response body: {message}")]
    Decode { op: String, message: String },
}

impl TransportError {
    pub fn request(op: &str, err: impl std::fmt::Display) -> Self {
        TransportError::Request {
            op: op.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(op: &str, err: impl std::fmt::Display) -> Self {
        TransportError::Decode {
            op: op.to_string(),
            message: err.to_string(),
        }
    }

    pub fn op(&self) -> &str {
        match self {
            TransportError::Unauthorized { op }
            | TransportError::Forbidden { op }
            | TransportError::NotFound { op }
            | TransportError::Status { op, .. }
            | TransportError::Request { op, .. }
            | TransportError::Decode { op, .. } => op,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound { .. })
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("missing id")]
    MissingId,

    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    #[error("invalid record json: {0}")]
    InvalidJson(String),
}

/// A well-formed transport response carried a clip record the feed cannot accept.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed clip record{}: {reason}", id_suffix(.id))]
pub struct MalformedRecordError {
    pub id: Option<String>,
    pub reason: MalformedReason,
}

fn id_suffix(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" {id}")).unwrap_or_default()
}

impl MalformedRecordError {
    pub fn new(id: Option<&str>, reason: MalformedReason) -> Self {
        Self {
            id: id.map(str::to_string),
            reason,
        }
    }
}

/// An optimistic settings change that the remote store did not commit.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("updating {setting} to {attempted} failed: {cause}")]
pub struct SettingUpdateFailed {
    pub setting: Setting,
    pub attempted: SettingValue,
    #[source]
    pub cause: TransportError,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvalidSettingValue {
    #[error("sensitivity must be between {min} and {max} (got {got})")]
    SensitivityOutOfRange { got: i64, min: u8, max: u8 },

    #[error("cannot parse {0:?} as a setting value")]
    Unparseable(String),
}
