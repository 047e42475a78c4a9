use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MalformedReason, MalformedRecordError};

use super::ClipTimestamp;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A clip record exactly as the remote store sent it, before validation.
///
/// Decoding never fails: a record that is not even a JSON object keeps the
/// decoder's message in `undecodable` and is rejected when the feed validates
/// it, so one bad element cannot poison the batch it arrived in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireClip")]
pub struct RawClip {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub image_ref: String,
    pub video_ref: String,

    #[serde(skip)]
    undecodable: Option<String>,
}

// Media locators appear under either name, possibly both, possibly null.
#[derive(Deserialize)]
struct WireClip {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    image_ref: Option<String>,
    #[serde(default)]
    image_filename: Option<String>,
    #[serde(default)]
    video_ref: Option<String>,
    #[serde(default)]
    video_filename: Option<String>,
}

impl From<WireClip> for RawClip {
    fn from(wire: WireClip) -> Self {
        Self {
            id: wire.id,
            timestamp: wire.timestamp,
            image_ref: wire.image_ref.or(wire.image_filename).unwrap_or_default(),
            video_ref: wire.video_ref.or(wire.video_filename).unwrap_or_default(),
            undecodable: None,
        }
    }
}

impl RawClip {
    pub fn new(id: &str, timestamp: &str, image_ref: &str, video_ref: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            timestamp: Some(timestamp.to_string()),
            image_ref: image_ref.to_string(),
            video_ref: video_ref.to_string(),
            undecodable: None,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(value) => Self::from_value(value),
            Err(err) => Self::undecodable(None, err.to_string()),
        }
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        let id = value.get("id").and_then(id_from_value);
        serde_json::from_value(value).unwrap_or_else(|err| Self::undecodable(id, err.to_string()))
    }

    fn undecodable(id: Option<String>, message: String) -> Self {
        Self {
            id,
            undecodable: Some(message),
            ..Self::default()
        }
    }
}

// The capture backend has used both numeric and string identifiers.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(id_from_value))
}

fn id_from_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// An immutable recorded event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Clip {
    pub id: ClipId,
    pub timestamp: ClipTimestamp,
    pub image_ref: String,
    pub video_ref: String,
}

impl TryFrom<RawClip> for Clip {
    type Error = MalformedRecordError;

    fn try_from(raw: RawClip) -> Result<Self, Self::Error> {
        if let Some(message) = raw.undecodable {
            return Err(MalformedRecordError::new(
                raw.id.as_deref(),
                MalformedReason::InvalidJson(message),
            ));
        }
        let id = match raw.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(MalformedRecordError::new(None, MalformedReason::MissingId)),
        };
        let Some(ts) = raw.timestamp.as_deref() else {
            return Err(MalformedRecordError::new(
                Some(&id),
                MalformedReason::MissingTimestamp,
            ));
        };
        let timestamp = ClipTimestamp::parse(ts).ok_or_else(|| {
            MalformedRecordError::new(Some(&id), MalformedReason::InvalidTimestamp(ts.to_string()))
        })?;

        Ok(Clip {
            id: ClipId(id),
            timestamp,
            image_ref: raw.image_ref,
            video_ref: raw.video_ref,
        })
    }
}

#[cfg(test)]
#[path = "../tests/model/clip_tests.rs"]
mod tests;
