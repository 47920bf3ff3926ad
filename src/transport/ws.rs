//! Default WebSocket socket implementation.
//!
//! [`WsSocket`] is the provided [`SocketClient`]: a client connection to a
//! realtime endpoint speaking JSON text frames of the form
//! `{ "topic": ..., "event": ..., "payload": ..., "ref": ... }`.
//!
//! Joins and leaves are sent as the `phx_join`/`phx_leave` events the
//! endpoint convention uses; pushes carry the caller's event name.
//!
//! Deliberately minimal: no reconnection, no backoff, no heartbeat, no
//! ordering guarantees. Those belong to a richer collaborator supplied
//! through the same [`SocketFactory`] seam.

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_str, to_string};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::{PushRef, Topic};

use super::socket::{EventSink, SocketClient, SocketFactory, SocketState, TransportEvent};

// ============================================================================
// Constants
// ============================================================================

/// Event name for joining a topic.
const JOIN_EVENT: &str = "phx_join";

/// Event name for leaving a topic.
const LEAVE_EVENT: &str = "phx_leave";

// ============================================================================
// Types
// ============================================================================

/// Write half of the WebSocket stream.
type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Read half of the WebSocket stream.
type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

// ============================================================================
// WireMessage
// ============================================================================

/// One JSON text frame on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    /// Topic the frame concerns.
    topic: Topic,
    /// Event name.
    event: String,
    /// Event payload.
    #[serde(default)]
    payload: Value,
    /// Correlation reference, present on pushes.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    push_ref: Option<PushRef>,
}

// ============================================================================
// WsSocket
// ============================================================================

/// WebSocket client connection to a realtime endpoint.
///
/// Created unconnected by [`WsSocketFactory`]; [`connect`](SocketClient::connect)
/// dials the endpoint and spawns the read loop. State transitions and
/// inbound frames are reported on the event sink.
pub struct WsSocket {
    /// Sink for transport events.
    sink: EventSink,
    /// Write half of the connection, present after `connect`.
    writer: Option<WsWriter>,
}

impl WsSocket {
    /// Creates an unconnected socket reporting on `sink`.
    #[inline]
    #[must_use]
    pub fn new(sink: EventSink) -> Self {
        Self { sink, writer: None }
    }

    /// Emits a state change on the sink.
    fn emit_state(&self, state: SocketState) {
        let _ = self.sink.send(TransportEvent::StateChanged(state));
    }

    /// Serializes and sends one frame on the open connection.
    async fn send_frame(&mut self, frame: WireMessage, operation: &str) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| Error::not_connected(operation))?;

        let json = to_string(&frame)?;
        writer.send(Message::Text(json.into())).await?;

        trace!(topic = %frame.topic, event = %frame.event, "Frame sent");
        Ok(())
    }
}

#[async_trait]
impl SocketClient for WsSocket {
    /// Dials the endpoint.
    ///
    /// Emits `Connecting`, then `Open` on success or `Errored` on failure,
    /// and spawns the read loop for inbound frames.
    async fn connect(&mut self, url: &str, params: &Value) -> Result<()> {
        let url = build_url(url, params)?;

        self.emit_state(SocketState::Connecting);
        debug!(url = %url, "Dialing realtime endpoint");

        let (stream, _response) = match connect_async(url.as_str()).await {
            Ok(ok) => ok,
            Err(e) => {
                self.emit_state(SocketState::Errored(e.to_string()));
                return Err(Error::transport_unavailable(e.to_string()));
            }
        };

        let (writer, reader) = stream.split();
        self.writer = Some(writer);

        tokio::spawn(run_read_loop(reader, self.sink.clone()));

        self.emit_state(SocketState::Open);
        debug!(url = %url, "Socket open");

        Ok(())
    }

    async fn join(&mut self, topic: &Topic, payload: Value) -> Result<()> {
        self.send_frame(
            WireMessage {
                topic: topic.clone(),
                event: JOIN_EVENT.to_string(),
                payload,
                push_ref: None,
            },
            "join",
        )
        .await
    }

    async fn push(
        &mut self,
        topic: &Topic,
        event: &str,
        payload: Value,
        push_ref: PushRef,
    ) -> Result<()> {
        self.send_frame(
            WireMessage {
                topic: topic.clone(),
                event: event.to_string(),
                payload,
                push_ref: Some(push_ref),
            },
            "push",
        )
        .await
    }

    async fn leave(&mut self, topic: &Topic) -> Result<()> {
        self.send_frame(
            WireMessage {
                topic: topic.clone(),
                event: LEAVE_EVENT.to_string(),
                payload: Value::Null,
                push_ref: None,
            },
            "leave",
        )
        .await
    }
}

// ============================================================================
// Read Loop
// ============================================================================

/// Forwards inbound frames and the final state change to the sink.
async fn run_read_loop(mut reader: WsReader, sink: EventSink) {
    while let Some(message) = reader.next().await {
        match message {
            Ok(Message::Text(text)) => match from_str::<WireMessage>(&text) {
                Ok(frame) => {
                    let _ = sink.send(TransportEvent::MessageReceived {
                        topic: frame.topic,
                        event: frame.event,
                        payload: frame.payload,
                    });
                }

                Err(e) => {
                    warn!(error = %e, "Failed to parse inbound frame");
                }
            },

            Ok(Message::Close(_)) => {
                debug!("WebSocket closed by remote");
                break;
            }

            Err(e) => {
                warn!(error = %e, "WebSocket error");
                let _ = sink.send(TransportEvent::StateChanged(SocketState::Errored(
                    e.to_string(),
                )));
                return;
            }

            // Ignore Binary, Ping, Pong, Frame
            _ => {}
        }
    }

    let _ = sink.send(TransportEvent::StateChanged(SocketState::Closed));
    debug!("Read loop terminated");
}

// ============================================================================
// URL Construction
// ============================================================================

/// Parses the endpoint URL and appends connection params as query pairs.
fn build_url(raw: &str, params: &Value) -> Result<Url> {
    let mut url = Url::parse(raw)?;

    if let Value::Object(map) = params {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in map {
            match value {
                Value::String(s) => {
                    pairs.append_pair(key, s);
                }
                other => {
                    pairs.append_pair(key, &other.to_string());
                }
            }
        }
    }

    Ok(url)
}

// ============================================================================
// WsSocketFactory
// ============================================================================

/// Factory producing unconnected [`WsSocket`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct WsSocketFactory;

impl WsSocketFactory {
    /// Creates the factory.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SocketFactory for WsSocketFactory {
    async fn create(&self, sink: EventSink) -> Result<Box<dyn SocketClient>> {
        Ok(Box::new(WsSocket::new(sink)))
    }
}

// ============================================================================
// Tests
// ============================================================================
