//! Type-safe identifiers for ports and transport entities.
//!
//! Newtype wrappers prevent mixing incompatible values at compile time:
//! a [`Topic`] cannot be passed where a [`PortName`] is expected, and a
//! [`PushRef`] is opaque to everything except correlation.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`PortName`] | Name of an application message port (closed set) |
//! | [`Topic`] | Channel topic on the realtime endpoint |
//! | [`PushRef`] | Correlation reference attached to outbound pushes |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// PortName
// ============================================================================

/// Name of an application message port.
///
/// The port surface is a closed set: the application always exposes exactly
/// these ports, independent of startup flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortName {
    /// Outbound port: application-emitted transport intents.
    ToSocket,
    /// Inbound port: transport-delivered application events.
    FromSocket,
}

impl PortName {
    /// All port names, in declaration order.
    pub const ALL: [Self; 2] = [Self::ToSocket, Self::FromSocket];

    /// Returns the wire name of the port.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToSocket => "toSocket",
            Self::FromSocket => "fromSocket",
        }
    }
}

impl fmt::Display for PortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Topic
// ============================================================================

/// A channel topic on the realtime endpoint (e.g. `room:lobby`).
///
/// Topics are opaque to this crate beyond being non-empty. The invariant
/// holds for deserialized values too: an empty topic on the wire is a
/// parse error, not a `Topic`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Topic(String);

impl Topic {
    /// Creates a topic from a non-empty string.
    ///
    /// Returns `None` if the string is empty.
    #[inline]
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Option<Self> {
        let topic = topic.into();
        if topic.is_empty() { None } else { Some(Self(topic)) }
    }

    /// Returns the topic as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Topic {
    type Error = crate::error::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| crate::error::Error::config("topic must be non-empty"))
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// PushRef
// ============================================================================

/// Correlation reference attached to each outbound push.
///
/// Generated per push; the remote end echoes it back in replies so callers
/// can correlate. This crate only generates and forwards it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushRef(Uuid);

impl PushRef {
    /// Generates a new unique push reference.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil reference, used where no correlation is wanted.
    #[inline]
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the nil reference.
    #[inline]
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for PushRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_name_strings() {
        assert_eq!(PortName::ToSocket.as_str(), "toSocket");
        assert_eq!(PortName::FromSocket.as_str(), "fromSocket");
    }

    #[test]
    fn test_port_name_all_is_exhaustive() {
        assert_eq!(PortName::ALL.len(), 2);
        assert!(PortName::ALL.contains(&PortName::ToSocket));
        assert!(PortName::ALL.contains(&PortName::FromSocket));
    }

    #[test]
    fn test_topic_rejects_empty() {
        assert!(Topic::new("").is_none());
        assert!(Topic::new("room:lobby").is_some());
    }

    #[test]
    fn test_topic_display() {
        let topic = Topic::new("room:lobby").expect("valid topic");
        assert_eq!(topic.to_string(), "room:lobby");
        assert_eq!(topic.as_str(), "room:lobby");
    }

    #[test]
    fn test_push_ref_unique() {
        let a = PushRef::generate();
        let b = PushRef::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_push_ref_nil() {
        assert!(PushRef::nil().is_nil());
        assert!(!PushRef::generate().is_nil());
    }

    #[test]
    fn test_topic_serializes_as_plain_string() {
        let topic = Topic::new("game:1").expect("valid topic");
        let json = serde_json::to_string(&topic).expect("serialize");
        assert_eq!(json, r#""game:1""#);
    }

    #[test]
    fn test_topic_deserializes_from_plain_string() {
        let topic: Topic = serde_json::from_str(r#""room:lobby""#).expect("deserialize");
        assert_eq!(topic.as_str(), "room:lobby");
    }

    #[test]
    fn test_topic_rejects_empty_on_deserialize() {
        let result = serde_json::from_str::<Topic>(r#""""#);
        assert!(result.is_err());
    }
}
