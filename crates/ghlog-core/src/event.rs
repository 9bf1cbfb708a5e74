//! Raw feed records and their normalized form.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::event_type::EventKind;

/// Errors raised while reading or rendering an event.
#[derive(Debug, Error)]
pub enum EventError {
    /// A required field was absent.
    #[error("event is missing `{field}`")]
    MissingField { field: &'static str },

    /// `created_at` was not an ISO 8601 timestamp.
    #[error("invalid created_at timestamp {value:?}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The event or its payload did not have the expected shape.
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A feed record exactly as GitHub returned it.
///
/// Kept as an untyped JSON tree so attribution can search every nested
/// `login` and `email`, whatever the event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent(Value);

impl RawEvent {
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw `type` field, if present.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The event's unique `id`, if present.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Parses `created_at`. The result keeps the UTC offset from the feed.
    pub fn created_at(&self) -> Result<DateTime<FixedOffset>, EventError> {
        let value = self
            .0
            .get("created_at")
            .and_then(Value::as_str)
            .ok_or(EventError::MissingField {
                field: "created_at",
            })?;
        DateTime::parse_from_rfc3339(value).map_err(|source| EventError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
    }
}

impl From<Value> for RawEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// An event ready for rendering.
///
/// Built from a [`RawEvent`] once it has been accepted; `created_at` is
/// already in the caller's time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Option<String>,
    pub kind: EventKind,
    pub created_at: DateTime<FixedOffset>,
    pub actor: String,
    pub repo: String,
    pub payload: Value,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: EventKind,
    actor: Login,
    repo: Name,
    #[serde(default)]
    payload: Value,
}

#[derive(Deserialize)]
struct Login {
    login: String,
}

#[derive(Deserialize)]
struct Name {
    name: String,
}

impl Event {
    /// Builds the normalized event from its raw record and the converted
    /// timestamp.
    pub fn normalize(raw: RawEvent, created_at: DateTime<FixedOffset>) -> Result<Self, EventError> {
        let envelope: Envelope = serde_json::from_value(raw.0)?;
        Ok(Self {
            id: envelope.id,
            kind: envelope.kind,
            created_at,
            actor: envelope.actor.login,
            repo: envelope.repo.name,
            payload: envelope.payload,
        })
    }
}
