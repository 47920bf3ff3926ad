//! Transport binder and binding handle.
//!
//! The binder performs the one-time wiring between the application's port
//! surface and the transport collaborators: each outbound port message
//! becomes a socket operation; each transport event is routed through the
//! subscription table and delivered on the inbound port.
//!
//! # Event Loop
//!
//! Binding spawns a tokio task that handles:
//!
//! - Outbound intents from the application's `toSocket` port
//! - Transport events from the socket's event sink
//! - Shutdown commands from the [`Binding`] handle
//!
//! The loop produces no inbound message until either side emits.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app::{App, TransportEnd};
use crate::error::Result;
use crate::protocol::OutboundMessage;

use super::presence::{PresenceFactory, PresenceTracker};
use super::routes::Routes;
use super::socket::{SocketClient, SocketFactory, TransportEvent};

// ============================================================================
// BinderCommand
// ============================================================================

/// Internal commands for the event loop.
enum BinderCommand {
    /// Tear down the binding.
    Shutdown,
}

// ============================================================================
// Binder
// ============================================================================

/// One-time wiring between an application's ports and a transport.
///
/// Holds the two transport-construction capabilities until [`bind`](Self::bind)
/// consumes them. Each binder binds exactly once.
pub struct Binder {
    /// Constructs the connection socket.
    socket_factory: Box<dyn SocketFactory>,
    /// Constructs the presence tracker.
    presence_factory: Box<dyn PresenceFactory>,
}

impl Binder {
    /// Creates a binder from the two transport-construction capabilities.
    #[must_use]
    pub fn new(
        socket_factory: impl SocketFactory + 'static,
        presence_factory: impl PresenceFactory + 'static,
    ) -> Self {
        Self {
            socket_factory: Box::new(socket_factory),
            presence_factory: Box::new(presence_factory),
        }
    }

    /// Wires the application's ports to the transport.
    ///
    /// Takes the binder side of the port surface, constructs the socket
    /// and presence tracker, builds the routing table, and spawns the
    /// event loop. The loop runs until shutdown or until the application
    /// side of the ports is dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::AlreadyBound`](crate::Error::AlreadyBound) if the
    ///   application is already bound
    /// - Any error from the socket factory
    pub async fn bind(self, app: &App) -> Result<Binding> {
        let end = app.ports().transport_end()?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let socket = self.socket_factory.create(event_tx).await?;
        let tracker = self.presence_factory.create();
        let routes = Routes::standard();

        let (command_tx, command_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_event_loop(
            end, event_rx, socket, tracker, routes, command_rx,
        ));

        info!("Ports bound to transport");

        Ok(Binding { command_tx })
    }
}

impl fmt::Debug for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder").finish_non_exhaustive()
    }
}

// ============================================================================
// Binding
// ============================================================================

/// Handle to an established binding.
///
/// Owns the transport's lifecycle: the wiring lives until [`shutdown`](Self::shutdown)
/// or process exit. Dropping the handle does NOT tear the binding down;
/// teardown is explicit.
pub struct Binding {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<BinderCommand>,
}

impl Binding {
    /// Returns `true` while the event loop is running.
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.command_tx.is_closed()
    }

    /// Tears down the binding.
    ///
    /// The event loop drains nothing further; the socket is dropped.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(BinderCommand::Shutdown);
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("bound", &self.is_bound())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Event Loop
// ============================================================================

/// Event loop bridging port messages and transport events.
async fn run_event_loop(
    mut end: TransportEnd,
    mut events: mpsc::UnboundedReceiver<TransportEvent>,
    mut socket: Box<dyn SocketClient>,
    mut tracker: Box<dyn PresenceTracker>,
    routes: Routes,
    mut command_rx: mpsc::UnboundedReceiver<BinderCommand>,
) {
    loop {
        tokio::select! {
            // Outbound intents from the application
            message = end.outbound.recv() => {
                match message {
                    Some(message) => {
                        handle_outbound(message, socket.as_mut()).await;
                    }

                    None => {
                        debug!("Application port dropped");
                        break;
                    }
                }
            }

            // Events from the transport
            event = events.recv() => {
                match event {
                    Some(event) => {
                        if let Some(inbound) = routes.dispatch(event, tracker.as_mut())
                            && end.inbound.send(inbound).is_err()
                        {
                            debug!("Inbound port dropped");
                            break;
                        }
                    }

                    None => {
                        debug!("Transport event stream ended");
                        break;
                    }
                }
            }

            // Commands from the Binding handle
            command = command_rx.recv() => {
                match command {
                    Some(BinderCommand::Shutdown) => {
                        debug!("Shutdown command received");
                        break;
                    }

                    None => {
                        debug!("Command channel closed");
                        break;
                    }
                }
            }
        }
    }

    debug!("Binder event loop terminated");
}

/// Translates one outbound intent into a socket operation.
///
/// Transport failures are logged and not retried here; retry policy
/// belongs to the socket implementation.
async fn handle_outbound(message: OutboundMessage, socket: &mut dyn SocketClient) {
    let result = match message {
        OutboundMessage::Connect { url, params } => socket.connect(&url, &params).await,

        OutboundMessage::Join { topic, payload } => socket.join(&topic, payload).await,

        OutboundMessage::Push {
            topic,
            event,
            payload,
            push_ref,
        } => socket.push(&topic, &event, payload, push_ref).await,

        OutboundMessage::Leave { topic } => socket.leave(&topic).await,
    };

    if let Err(e) = result {
        warn!(error = %e, "Transport operation failed");
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::flags::StartupFlags;
    use crate::identifiers::{PushRef, Topic};
    use crate::protocol::InboundMessage;
    use crate::transport::presence::RelayPresenceFactory;
    use crate::transport::socket::{EventSink, SocketState};

    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::{Value, json};
    use tokio::time::timeout;
    use tracing_subscriber::EnvFilter;

    /// Initialize tracing for event-loop tests; honors `RUST_LOG`.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_target(false)
            .try_init();
    }

    /// Socket fake recording every operation.
    struct RecordingSocket {
        ops: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl SocketClient for RecordingSocket {
        async fn connect(&mut self, url: &str, _params: &Value) -> Result<()> {
            self.ops.lock().push(format!("connect {url}"));
            Ok(())
        }

        async fn join(&mut self, topic: &Topic, _payload: Value) -> Result<()> {
            self.ops.lock().push(format!("join {topic}"));
            Ok(())
        }

        async fn push(
            &mut self,
            topic: &Topic,
            event: &str,
            _payload: Value,
            _push_ref: PushRef,
        ) -> Result<()> {
            self.ops.lock().push(format!("push {topic} {event}"));
            Ok(())
        }

        async fn leave(&mut self, topic: &Topic) -> Result<()> {
            self.ops.lock().push(format!("leave {topic}"));
            Ok(())
        }
    }

    /// Factory handing out recording sockets and exposing the event sink.
    struct RecordingFactory {
        ops: Arc<Mutex<Vec<String>>>,
        sink: Arc<Mutex<Option<EventSink>>>,
    }

    impl RecordingFactory {
        fn new() -> Self {
            Self {
                ops: Arc::new(Mutex::new(Vec::new())),
                sink: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl SocketFactory for RecordingFactory {
        async fn create(&self, sink: EventSink) -> Result<Box<dyn SocketClient>> {
            *self.sink.lock() = Some(sink);
            Ok(Box::new(RecordingSocket {
                ops: Arc::clone(&self.ops),
            }))
        }
    }

    fn make_app() -> App {
        App::builder()
            .flags(StartupFlags::new(800, 1200, "v3"))
            .build()
            .expect("build app")
    }

    async fn settle() {
        // Let the spawned event loop process queued messages.
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_bind_wires_without_error() {
        init_tracing();

        let app = make_app();
        let factory = RecordingFactory::new();
        let binding = Binder::new(factory, RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        assert!(binding.is_bound());
        assert!(app.ports().is_bound());
    }

    #[tokio::test]
    async fn test_second_bind_fails() {
        let app = make_app();

        let _binding = Binder::new(RecordingFactory::new(), RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("first bind");

        let err = Binder::new(RecordingFactory::new(), RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect_err("second bind must fail");
        assert!(matches!(err, Error::AlreadyBound));
    }

    #[tokio::test]
    async fn test_outbound_intents_become_socket_operations() {
        let app = make_app();
        let factory = RecordingFactory::new();
        let ops = Arc::clone(&factory.ops);

        let _binding = Binder::new(factory, RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        let topic = Topic::new("room:lobby").expect("valid topic");
        let ports = app.ports();
        ports
            .send(OutboundMessage::connect("ws://localhost:4000/socket"))
            .expect("send");
        ports
            .send(OutboundMessage::join(topic.clone(), json!({})))
            .expect("send");
        ports
            .send(OutboundMessage::push(topic.clone(), "shout", json!({"body": "hi"})))
            .expect("send");
        ports.send(OutboundMessage::leave(topic)).expect("send");

        settle().await;

        let recorded = ops.lock().clone();
        assert_eq!(
            recorded,
            vec![
                "connect ws://localhost:4000/socket",
                "join room:lobby",
                "push room:lobby shout",
                "leave room:lobby",
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_events_reach_inbound_port() {
        let app = make_app();
        let factory = RecordingFactory::new();
        let sink_slot = Arc::clone(&factory.sink);

        let _binding = Binder::new(factory, RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        let mut inbound = app.ports().subscribe().expect("subscribe");
        let sink = sink_slot.lock().clone().expect("factory received sink");

        sink.send(TransportEvent::StateChanged(SocketState::Open))
            .expect("emit");

        let msg = timeout(Duration::from_secs(1), inbound.recv())
            .await
            .expect("no timeout")
            .expect("message");
        assert_eq!(msg, InboundMessage::SocketOpened);
    }

    #[tokio::test]
    async fn test_no_output_until_either_side_emits() {
        let app = make_app();

        let _binding = Binder::new(RecordingFactory::new(), RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        let mut inbound = app.ports().subscribe().expect("subscribe");
        settle().await;

        assert!(
            inbound.try_recv().is_err(),
            "binding alone must produce no inbound message"
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_event_loop() {
        let app = make_app();
        let binding = Binder::new(RecordingFactory::new(), RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        binding.shutdown();
        settle().await;

        assert!(!binding.is_bound());
    }

    #[tokio::test]
    async fn test_failed_operation_does_not_stop_loop() {
        struct FailingSocket;

        #[async_trait]
        impl SocketClient for FailingSocket {
            async fn connect(&mut self, _url: &str, _params: &Value) -> Result<()> {
                Err(Error::transport_unavailable("refused"))
            }
            async fn join(&mut self, _topic: &Topic, _payload: Value) -> Result<()> {
                Ok(())
            }
            async fn push(
                &mut self,
                _topic: &Topic,
                _event: &str,
                _payload: Value,
                _push_ref: PushRef,
            ) -> Result<()> {
                Ok(())
            }
            async fn leave(&mut self, _topic: &Topic) -> Result<()> {
                Ok(())
            }
        }

        struct FailingFactory;

        #[async_trait]
        impl SocketFactory for FailingFactory {
            async fn create(&self, _sink: EventSink) -> Result<Box<dyn SocketClient>> {
                Ok(Box::new(FailingSocket))
            }
        }

        let app = make_app();
        let binding = Binder::new(FailingFactory, RelayPresenceFactory::new())
            .bind(&app)
            .await
            .expect("bind");

        app.ports()
            .send(OutboundMessage::connect("ws://unreachable"))
            .expect("send");
        settle().await;

        // Failure is logged, not fatal: the binding stays up.
        assert!(binding.is_bound());
    }
}
