//! Application-consumed transport events.
//!
//! The binder translates raw transport events into these messages and
//! delivers them on the application's inbound port. Presence messages are
//! produced by the configured presence tracker; everything else passes
//! through as a channel message.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::Topic;

// ============================================================================
// InboundMessage
// ============================================================================

/// A transport event delivered to the application on its inbound port.
///
/// # Format
///
/// ```json
/// { "msg": "channelMessage", "payload": { "topic": "room:lobby", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", content = "payload", rename_all = "camelCase")]
pub enum InboundMessage {
    /// The socket connection is open.
    SocketOpened,

    /// The socket connection closed.
    SocketClosed,

    /// The socket connection failed.
    SocketError {
        /// Human-readable failure reason.
        reason: String,
    },

    /// A message arrived on a joined topic.
    ChannelMessage {
        /// Source topic.
        topic: Topic,
        /// Event name.
        event: String,
        /// Event payload.
        payload: Value,
    },

    /// Full presence state for a topic.
    PresenceState {
        /// Source topic.
        topic: Topic,
        /// Presence state as delivered by the remote end.
        state: Value,
    },

    /// Incremental presence change for a topic.
    PresenceDiff {
        /// Source topic.
        topic: Topic,
        /// Peers that joined.
        joins: Value,
        /// Peers that left.
        leaves: Value,
    },
}

impl InboundMessage {
    /// Returns `true` if this message reports socket state.
    #[inline]
    #[must_use]
    pub fn is_socket_state(&self) -> bool {
        matches!(
            self,
            Self::SocketOpened | Self::SocketClosed | Self::SocketError { .. }
        )
    }

    /// Returns `true` if this message reports presence.
    #[inline]
    #[must_use]
    pub fn is_presence(&self) -> bool {
        matches!(self, Self::PresenceState { .. } | Self::PresenceDiff { .. })
    }

    /// Returns the topic this message concerns, if any.
    #[inline]
    #[must_use]
    pub fn topic(&self) -> Option<&Topic> {
        match self {
            Self::SocketOpened | Self::SocketClosed | Self::SocketError { .. } => None,
            Self::ChannelMessage { topic, .. }
            | Self::PresenceState { topic, .. }
            | Self::PresenceDiff { topic, .. } => Some(topic),
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
    fn test_socket_opened_serialization() {
        let json = serde_json::to_string(&InboundMessage::SocketOpened).expect("serialize");
        assert!(json.contains(r#""msg":"socketOpened""#));
    }

    #[test]
    fn test_channel_message_roundtrip() {
        let msg = InboundMessage::ChannelMessage {
            topic: lobby(),
            event: "shout".into(),
            payload: json!({"body": "hi"}),
        };
        let json = serde_json::to_string(&msg).expect("serialize");
        let parsed: InboundMessage = serde_json::from_str(&json).expect("parse");

        assert_eq!(parsed, msg);
    }

    #[test]
    fn test_presence_diff_camel_case_tag() {
        let msg = InboundMessage::PresenceDiff {
            topic: lobby(),
            joins: json!({"u1": {}}),
            leaves: json!({}),
        };
        let json = serde_json::to_string(&msg).expect("serialize");

        assert!(json.contains(r#""msg":"presenceDiff""#));
    }

    #[test]
    fn test_predicates() {
        let state = InboundMessage::SocketError { reason: "x".into() };
        let diff = InboundMessage::PresenceDiff {
            topic: lobby(),
            joins: Value::Null,
            leaves: Value::Null,
        };

        assert!(state.is_socket_state());
        assert!(!state.is_presence());
        assert!(diff.is_presence());
        assert!(!diff.is_socket_state());
    }

    #[test]
    fn test_topic_accessor() {
        assert!(InboundMessage::SocketClosed.topic().is_none());

        let msg = InboundMessage::PresenceState {
            topic: lobby(),
            state: Value::Null,
        };
        assert_eq!(msg.topic().map(Topic::as_str), Some("room:lobby"));
    }
}
