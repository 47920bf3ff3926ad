//! Application-emitted transport intents.
//!
//! Each variant corresponds to exactly one transport operation. The binder
//! performs the translation; the application never touches the socket.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::{PushRef, Topic};

// ============================================================================
// OutboundMessage
// ============================================================================

/// A transport intent emitted by the application on its outbound port.
///
/// # Format
///
/// ```json
/// { "msg": "push", "payload": { "topic": "room:lobby", "event": "shout", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", content = "payload", rename_all = "camelCase")]
pub enum OutboundMessage {
    /// Open the socket to the realtime endpoint.
    Connect {
        /// Endpoint URL (`ws://` or `wss://`).
        url: String,
        /// Connection parameters, appended to the URL as query pairs.
        #[serde(default)]
        params: Value,
    },

    /// Join a topic on the open socket.
    Join {
        /// Topic to join.
        topic: Topic,
        /// Join payload forwarded to the remote end.
        #[serde(default)]
        payload: Value,
    },

    /// Push an event to a joined topic.
    Push {
        /// Target topic.
        topic: Topic,
        /// Event name.
        event: String,
        /// Event payload.
        #[serde(default)]
        payload: Value,
        /// Correlation reference echoed back by the remote end.
        #[serde(rename = "ref")]
        push_ref: PushRef,
    },

    /// Leave a joined topic.
    Leave {
        /// Topic to leave.
        topic: Topic,
    },
}

impl OutboundMessage {
    /// Creates a connect intent without parameters.
    #[inline]
    #[must_use]
    pub fn connect(url: impl Into<String>) -> Self {
        Self::Connect {
            url: url.into(),
            params: Value::Null,
        }
    }

    /// Creates a connect intent with parameters.
    #[inline]
    #[must_use]
    pub fn connect_with_params(url: impl Into<String>, params: Value) -> Self {
        Self::Connect {
            url: url.into(),
            params,
        }
    }

    /// Creates a join intent.
    #[inline]
    #[must_use]
    pub fn join(topic: Topic, payload: Value) -> Self {
        Self::Join { topic, payload }
    }

    /// Creates a push intent with a freshly generated reference.
    #[inline]
    #[must_use]
    pub fn push(topic: Topic, event: impl Into<String>, payload: Value) -> Self {
        Self::Push {
            topic,
            event: event.into(),
            payload,
            push_ref: PushRef::generate(),
        }
    }

    /// Creates a leave intent.
    #[inline]
    #[must_use]
    pub fn leave(topic: Topic) -> Self {
        Self::Leave { topic }
    }

    /// Returns the topic this intent targets, if any.
    #[inline]
    #[must_use]
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            Self::Connect { .. } => None,
            Self::Join { topic, .. } | Self::Push { topic, .. } | Self::Leave { topic } => {
                Some(topic)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn lobby() -> Topic {
        Topic::new("room:lobby").expect("valid topic")
    }

    #[test]
    fn test_connect_serialization() {
        let msg = OutboundMessage::connect("ws://localhost:4000/socket");
        let json = serde_json::to_string(&msg).expect("serialize");

        assert!(json.contains(r#""msg":"connect""#));
        assert!(json.contains("ws://localhost:4000/socket"));
    }

    #[test]
    fn test_push_serialization_uses_ref_name() {
        let msg = OutboundMessage::push(lobby(), "shout", json!({"body": "hi"}));
        let json = serde_json::to_string(&msg).expect("serialize");

        assert!(json.contains(r#""msg":"push""#));
        assert!(json.contains(r#""ref":"#));
        assert!(json.contains(r#""event":"shout""#));
    }

    #[test]
    fn test_join_roundtrip() {
        let msg = OutboundMessage::join(lobby(), json!({"token": "t"}));
        let json = serde_json::to_string(&msg).expect("serialize");
        let parsed: OutboundMessage = serde_json::from_str(&json).expect("parse");

        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_topic_accessor() {
        assert!(OutboundMessage::connect("ws://x").topic().is_none());
        assert_eq!(
            OutboundMessage::leave(lobby()).topic().map(Topic::as_str),
            Some("room:lobby")
        );
    }

    #[test]
    fn test_push_generates_unique_refs() {
        let a = OutboundMessage::push(lobby(), "e", Value::Null);
        let b = OutboundMessage::push(lobby(), "e", Value::Null);

        let (OutboundMessage::Push { push_ref: ra, .. }, OutboundMessage::Push { push_ref: rb, .. }) =
            (a, b)
        else {
            panic!("expected push variants");
        };
        assert_ne!(ra, rb);
    }
}
