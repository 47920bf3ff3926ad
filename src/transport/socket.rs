//! Socket client seam.
//!
//! The binder drives the realtime connection through [`SocketClient`], a
//! trait with one method per outbound intent. Implementations report what
//! happens on the wire back through an [`EventSink`] as [`TransportEvent`]s.
//!
//! The default implementation is [`WsSocket`](super::ws::WsSocket);
//! tests substitute recording fakes.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::Result;
use crate::identifiers::{PushRef, Topic};

// ============================================================================
// Types
// ============================================================================

/// Channel on which a socket reports transport events to the binder.
pub type EventSink = mpsc::UnboundedSender<TransportEvent>;

// ============================================================================
// SocketState
// ============================================================================

/// Connection state of the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketState {
    /// Dialing the endpoint.
    Connecting,
    /// Connection is open.
    Open,
    /// Connection closed.
    Closed,
    /// Connection failed.
    Errored(String),
}

// ============================================================================
// TransportEvent
// ============================================================================

/// An event delivered by the socket to the binder.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The socket's connection state changed.
    StateChanged(SocketState),

    /// A message arrived on a joined topic.
    MessageReceived {
        /// Source topic.
        topic: Topic,
        /// Event name.
        event: String,
        /// Event payload.
        payload: Value,
    },
}

impl TransportEvent {
    /// Returns the kind of this event, used as the routing key.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TransportEventKind {
        match self {
            Self::StateChanged(_) => TransportEventKind::StateChanged,
            Self::MessageReceived { .. } => TransportEventKind::MessageReceived,
        }
    }
}

// ============================================================================
// TransportEventKind
// ============================================================================

/// Discriminant of [`TransportEvent`], the key of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportEventKind {
    /// Socket state change.
    StateChanged,
    /// Channel message.
    MessageReceived,
}

impl TransportEventKind {
    /// All event kinds, in declaration order.
    pub const ALL: [Self; 2] = [Self::StateChanged, Self::MessageReceived];
}

// ============================================================================
// SocketClient
// ============================================================================

/// A stateful connection to a realtime message endpoint.
///
/// One method per outbound intent. Implementations own the wire protocol;
/// the binder owns the translation from port messages to these calls.
/// Reconnection and backoff, where wanted, live in the implementation,
/// never in the binder.
#[async_trait]
pub trait SocketClient: Send {
    /// Opens the connection to the endpoint.
    ///
    /// Implementations emit [`SocketState`] transitions on their sink.
    async fn connect(&mut self, url: &str, params: &Value) -> Result<()>;

    /// Joins a topic on the open connection.
    async fn join(&mut self, topic: &Topic, payload: Value) -> Result<()>;

    /// Pushes an event to a joined topic.
    async fn push(
        &mut self,
        topic: &Topic,
        event: &str,
        payload: Value,
        push_ref: PushRef,
    ) -> Result<()>;

    /// Leaves a joined topic.
    async fn leave(&mut self, topic: &Topic) -> Result<()>;
}

// ============================================================================
// SocketFactory
// ============================================================================

/// Constructs a [`SocketClient`] wired to the given event sink.
///
/// One of the two transport-construction capabilities the binder is given;
/// called exactly once per binding.
#[async_trait]
pub trait SocketFactory: Send + Sync {
    /// Creates an unconnected socket client reporting on `sink`.
    async fn create(&self, sink: EventSink) -> Result<Box<dyn SocketClient>>;
}

// ============================================================================
// Tests
// ============================================================================
