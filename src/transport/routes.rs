//! Inbound routing table.
//!
//! The translation from transport events to inbound port messages is an
//! explicit table built once at bind time: event kind in, handler out.
//! Unit tests invoke [`Routes::dispatch`] directly, with no live transport
//! behind it.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::protocol::InboundMessage;

use super::presence::PresenceTracker;
use super::socket::{SocketState, TransportEvent, TransportEventKind};

// ============================================================================
// Types
// ============================================================================

/// Handler translating one transport event into an inbound message.
///
/// Returns `None` when the event produces no application-visible message.
type RouteHandler = fn(TransportEvent, &mut dyn PresenceTracker) -> Option<InboundMessage>;

// ============================================================================
// Routes
// ============================================================================

/// The subscription table: event kind → translation handler.
///
/// Constructed once per binding and never mutated afterwards.
pub struct Routes {
    /// Handlers keyed by event kind.
    table: FxHashMap<TransportEventKind, RouteHandler>,
}

impl Routes {
    /// Builds the standard table covering every event kind.
    #[must_use]
    pub fn standard() -> Self {
        let mut table: FxHashMap<TransportEventKind, RouteHandler> = FxHashMap::default();
        table.insert(TransportEventKind::StateChanged, route_state_changed);
        table.insert(TransportEventKind::MessageReceived, route_message_received);

        debug_assert!(
            TransportEventKind::ALL.iter().all(|k| table.contains_key(k)),
            "routing table must cover every event kind"
        );

        Self { table }
    }

    /// Translates a transport event into an inbound message.
    ///
    /// Returns `None` for events with no application-visible translation
    /// (e.g. the `Connecting` state).
    pub fn dispatch(
        &self,
        event: TransportEvent,
        tracker: &mut dyn PresenceTracker,
    ) -> Option<InboundMessage> {
        let kind = event.kind();
        let handler = self.table.get(&kind)?;
        let message = handler(event, tracker);

        trace!(?kind, translated = message.is_some(), "Dispatched transport event");
        message
    }

    /// Returns the number of routed event kinds.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the table is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Translates socket state changes.
///
/// `Connecting` is internal to the transport and produces no message.
fn route_state_changed(
    event: TransportEvent,
    _tracker: &mut dyn PresenceTracker,
) -> Option<InboundMessage> {
    let TransportEvent::StateChanged(state) = event else {
        return None;
    };

    match state {
        SocketState::Connecting => None,
        SocketState::Open => Some(InboundMessage::SocketOpened),
        SocketState::Closed => Some(InboundMessage::SocketClosed),
        SocketState::Errored(reason) => Some(InboundMessage::SocketError { reason }),
    }
}

/// Translates channel messages, giving the presence tracker first refusal.
fn route_message_received(
    event: TransportEvent,
    tracker: &mut dyn PresenceTracker,
) -> Option<InboundMessage> {
    let TransportEvent::MessageReceived {
        topic,
        event,
        payload,
    } = event
    else {
        return None;
    };

    if let Some(presence) = tracker.translate(&topic, &event, &payload) {
        return Some(presence);
    }

    Some(InboundMessage::ChannelMessage {
        topic,
        event,
        payload,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::Topic;
    use crate::transport::presence::{PRESENCE_DIFF_EVENT, RelayPresence};

    use serde_json::{Value, json};

    fn lobby() -> Topic {
        Topic::new("room:lobby").expect("valid topic")
    }

    #[test]
    fn test_standard_table_covers_all_kinds() {
        let routes = Routes::standard();
        assert_eq!(routes.len(), TransportEventKind::ALL.len());
        assert!(!routes.is_empty());
    }

    #[test]
    fn test_open_translates_to_socket_opened() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::StateChanged(SocketState::Open),
            &mut tracker,
        );
        assert_eq!(msg, Some(InboundMessage::SocketOpened));
    }

    #[test]
    fn test_connecting_produces_no_message() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::StateChanged(SocketState::Connecting),
            &mut tracker,
        );
        assert_eq!(msg, None);
    }

    #[test]
    fn test_errored_carries_reason() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::StateChanged(SocketState::Errored("refused".into())),
            &mut tracker,
        );
        assert_eq!(
            msg,
            Some(InboundMessage::SocketError {
                reason: "refused".into()
            })
        );
    }

    #[test]
    fn test_channel_message_passes_through() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::MessageReceived {
                topic: lobby(),
                event: "shout".into(),
                payload: json!({"body": "hi"}),
            },
            &mut tracker,
        );

        assert_eq!(
            msg,
            Some(InboundMessage::ChannelMessage {
                topic: lobby(),
                event: "shout".into(),
                payload: json!({"body": "hi"}),
            })
        );
    }

    #[test]
    fn test_presence_event_takes_presence_route() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::MessageReceived {
                topic: lobby(),
                event: PRESENCE_DIFF_EVENT.into(),
                payload: json!({"joins": {}, "leaves": {}}),
            },
            &mut tracker,
        );

        assert_eq!(
            msg,
            Some(InboundMessage::PresenceDiff {
                topic: lobby(),
                joins: json!({}),
                leaves: json!({}),
            })
        );
    }

    #[test]
    fn test_closed_translates_to_socket_closed() {
        let routes = Routes::standard();
        let mut tracker = RelayPresence::new();

        let msg = routes.dispatch(
            TransportEvent::StateChanged(SocketState::Closed),
            &mut tracker,
        );
        assert_eq!(msg, Some(InboundMessage::SocketClosed));
    }

    #[test]
    fn test_dispatch_ignores_tracker_state_for_plain_events() {
        // The tracker only sees MessageReceived payloads.
        struct Panicking;
        impl crate::transport::presence::PresenceTracker for Panicking {
            fn translate(
                &mut self,
                _topic: &Topic,
                _event: &str,
                _payload: &Value,
            ) -> Option<InboundMessage> {
                panic!("tracker must not be consulted for state changes");
            }
        }

        let routes = Routes::standard();
        let mut tracker = Panicking;
        let msg = routes.dispatch(
            TransportEvent::StateChanged(SocketState::Open),
            &mut tracker,
        );
        assert_eq!(msg, Some(InboundMessage::SocketOpened));
    }
}
