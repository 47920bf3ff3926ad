//! Presence tracking seam.
//!
//! Presence rides on ordinary channel messages: the remote end publishes
//! `presence_state` and `presence_diff` events on the joined topic. The
//! tracker's job at this layer is recognition and translation only;
//! membership semantics (who is online, conflict resolution) belong to the
//! collaborator behind this trait.

// ============================================================================
// Imports
// ============================================================================

use serde_json::Value;
use tracing::trace;

use crate::identifiers::Topic;
use crate::protocol::InboundMessage;

// ============================================================================
// Constants
// ============================================================================

/// Event name carrying full presence state.
pub const PRESENCE_STATE_EVENT: &str = "presence_state";

/// Event name carrying an incremental presence change.
pub const PRESENCE_DIFF_EVENT: &str = "presence_diff";

// ============================================================================
// PresenceTracker
// ============================================================================

/// Recognizes presence events among channel messages.
///
/// Returns `Some` with the translated inbound message when the event is a
/// presence event, `None` when the message should pass through as an
/// ordinary channel message.
pub trait PresenceTracker: Send {
    /// Inspects a channel message and translates it if it reports presence.
    fn translate(&mut self, topic: &Topic, event: &str, payload: &Value) -> Option<InboundMessage>;
}

// ============================================================================
// PresenceFactory
// ============================================================================

/// Constructs a [`PresenceTracker`].
///
/// One of the two transport-construction capabilities the binder is given;
/// called exactly once per binding.
pub trait PresenceFactory: Send + Sync {
    /// Creates a tracker for the lifetime of one binding.
    fn create(&self) -> Box<dyn PresenceTracker>;
}

// ============================================================================
// RelayPresence
// ============================================================================

/// The provided tracker: a pure relay.
///
/// Translates the two presence events into typed inbound messages and
/// keeps no membership state of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayPresence;

impl RelayPresence {
    /// Creates a relay tracker.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PresenceTracker for RelayPresence {
    fn translate(&mut self, topic: &Topic, event: &str, payload: &Value) -> Option<InboundMessage> {
        match event {
            PRESENCE_STATE_EVENT => {
                trace!(%topic, "Presence state received");
                Some(InboundMessage::PresenceState {
                    topic: topic.clone(),
                    state: payload.clone(),
                })
            }

            PRESENCE_DIFF_EVENT => {
                trace!(%topic, "Presence diff received");
                Some(InboundMessage::PresenceDiff {
                    topic: topic.clone(),
                    joins: payload.get("joins").cloned().unwrap_or(Value::Null),
                    leaves: payload.get("leaves").cloned().unwrap_or(Value::Null),
                })
            }

            _ => None,
        }
    }
}

// ============================================================================
// RelayPresenceFactory
// ============================================================================

/// Factory producing [`RelayPresence`] trackers.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelayPresenceFactory;

impl RelayPresenceFactory {
    /// Creates the factory.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PresenceFactory for RelayPresenceFactory {
    fn create(&self) -> Box<dyn PresenceTracker> {
        Box::new(RelayPresence::new())
    }
}

// ============================================================================
// Tests
// ============================================================================
