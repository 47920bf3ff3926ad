//! The application's message port surface.
//!
//! Ports are the only seam between the application and the transport
//! binder. The surface is fixed at construction time and independent of
//! startup flag values: one outbound port ([`PortName::ToSocket`]) and one
//! inbound port ([`PortName::FromSocket`]).
//!
//! Each side of the surface is handed out exactly once:
//!
//! - The application side keeps the outbound sender and takes the inbound
//!   receiver via [`Ports::subscribe`].
//! - The binder takes the opposite ends via [`Ports::transport_end`]; a
//!   second call errors [`Error::AlreadyBound`], which is what makes the
//!   `unbound -> bound` transition one-way.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::trace;

use crate::error::{Error, Result};
use crate::identifiers::PortName;
use crate::protocol::{InboundMessage, OutboundMessage};

// ============================================================================
// TransportEnd
// ============================================================================

/// The binder's side of the port surface.
///
/// Handed out exactly once per application.
pub struct TransportEnd {
    /// Receives application-emitted transport intents.
    pub outbound: mpsc::UnboundedReceiver<OutboundMessage>,
    /// Delivers transport events to the application.
    pub inbound: mpsc::UnboundedSender<InboundMessage>,
}

impl fmt::Debug for TransportEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportEnd").finish_non_exhaustive()
    }
}

// ============================================================================
// Ports
// ============================================================================

/// The application's bidirectional message port surface.
///
/// # Thread Safety
///
/// `Ports` is `Send + Sync`; sends never block.
pub struct Ports {
    /// Application-side sender for outbound intents.
    outbound_tx: mpsc::UnboundedSender<OutboundMessage>,
    /// Binder-side receiver for outbound intents (taken once).
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<OutboundMessage>>>,
    /// Binder-side sender for inbound events.
    inbound_tx: mpsc::UnboundedSender<InboundMessage>,
    /// Application-side receiver for inbound events (taken once).
    inbound_rx: Mutex<Option<mpsc::UnboundedReceiver<InboundMessage>>>,
}

impl Ports {
    /// Creates the port surface.
    ///
    /// Both channels are created up front; there is no partially
    /// constructed state.
    pub(crate) fn new() -> Self {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        Self {
            outbound_tx,
            outbound_rx: Mutex::new(Some(outbound_rx)),
            inbound_tx,
            inbound_rx: Mutex::new(Some(inbound_rx)),
        }
    }

    /// Returns the fixed set of port names.
    ///
    /// Identical for every application instance, regardless of flags.
    #[inline]
    #[must_use]
    pub fn names(&self) -> &'static [PortName] {
        &PortName::ALL
    }

    /// Emits a transport intent on the outbound port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PortClosed`] if the binder side has been dropped.
    pub fn send(&self, message: OutboundMessage) -> Result<()> {
        trace!(?message, "Outbound port message");
        self.outbound_tx
            .send(message)
            .map_err(|_| Error::port_closed(PortName::ToSocket.as_str()))
    }

    /// Takes the application-side receiver for inbound events.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if already taken; there is exactly one
    /// consumer of the inbound port.
    pub fn subscribe(&self) -> Result<mpsc::UnboundedReceiver<InboundMessage>> {
        self.inbound_rx
            .lock()
            .take()
            .ok_or_else(|| Error::config("Inbound port already subscribed"))
    }

    /// Takes the binder's side of the port surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyBound`] on the second and subsequent calls.
    pub fn transport_end(&self) -> Result<TransportEnd> {
        let outbound = self
            .outbound_rx
            .lock()
            .take()
            .ok_or(Error::AlreadyBound)?;

        Ok(TransportEnd {
            outbound,
            inbound: self.inbound_tx.clone(),
        })
    }

    /// Returns `true` if the binder has taken its side of the surface.
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.outbound_rx.lock().is_none()
    }
}

impl fmt::Debug for Ports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ports")
            .field("names", &self.names())
            .field("bound", &self.is_bound())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_surface_is_fixed() {
        let ports = Ports::new();
        assert_eq!(ports.names(), &[PortName::ToSocket, PortName::FromSocket]);
    }

    #[tokio::test]
    async fn test_send_reaches_transport_end() {
        let ports = Ports::new();
        let mut end = ports.transport_end().expect("first take");

        ports
            .send(OutboundMessage::connect("ws://localhost:4000"))
            .expect("send");

        let received = end.outbound.recv().await.expect("message");
        assert_eq!(received, OutboundMessage::connect("ws://localhost:4000"));
    }

    #[tokio::test]
    async fn test_inbound_reaches_subscriber() {
        let ports = Ports::new();
        let end = ports.transport_end().expect("first take");
        let mut inbound = ports.subscribe().expect("subscribe");

        end.inbound
            .send(InboundMessage::SocketOpened)
            .expect("send inbound");

        let received = inbound.recv().await.expect("message");
        assert_eq!(received, InboundMessage::SocketOpened);
    }

    #[test]
    fn test_transport_end_taken_once() {
        let ports = Ports::new();
        assert!(!ports.is_bound());

        let _end = ports.transport_end().expect("first take");
        assert!(ports.is_bound());

        let err = ports.transport_end().expect_err("second take must fail");
        assert!(matches!(err, Error::AlreadyBound));
    }

    #[test]
    fn test_subscribe_taken_once() {
        let ports = Ports::new();
        let _rx = ports.subscribe().expect("first subscribe");
        assert!(ports.subscribe().is_err());
    }

    #[test]
    fn test_send_after_transport_end_dropped() {
        let ports = Ports::new();
        let end = ports.transport_end().expect("take");
        drop(end);

        let err = ports
            .send(OutboundMessage::connect("ws://x"))
            .expect_err("send must fail");
        assert!(matches!(err, Error::PortClosed { .. }));
    }
}
