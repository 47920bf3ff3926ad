//! Transport binding layer.
//!
//! This module wires the application's port surface to the realtime
//! transport: outbound intents become socket operations, transport events
//! become inbound port messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  OutboundMessage   ┌──────────────┐   operations   ┌──────────────┐
//! │  App ports   │───────────────────►│    Binder    │───────────────►│ SocketClient │
//! │  toSocket /  │                    │  event loop  │                │  (WsSocket)  │
//! │  fromSocket  │◄───────────────────│   + Routes   │◄───────────────│  + Presence  │
//! └──────────────┘  InboundMessage    └──────────────┘ TransportEvent └──────────────┘
//! ```
//!
//! # Binding Lifecycle
//!
//! 1. `Binder::new` - Supply the socket and presence factories
//! 2. `Binder::bind` - Take the port surface, construct collaborators, spawn the loop
//! 3. `Binding` - Explicitly owned handle; `shutdown` tears down
//!
//! The transition is one-way: a second bind on the same application fails.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `binder` | One-time wiring and the event loop |
//! | `presence` | Presence tracking seam and the relay tracker |
//! | `routes` | Subscription table from event kind to translation |
//! | `socket` | Socket client seam and transport events |
//! | `ws` | Default WebSocket socket implementation |

// ============================================================================
// Submodules
// ============================================================================

/// One-time wiring and the event loop.
pub mod binder;

/// Presence tracking seam.
pub mod presence;

/// Inbound routing table.
pub mod routes;

/// Socket client seam.
pub mod socket;

/// Default WebSocket socket implementation.
pub mod ws;

// ============================================================================
// Re-exports
// ============================================================================

pub use binder::{Binder, Binding};
pub use presence::{PresenceFactory, PresenceTracker, RelayPresence, RelayPresenceFactory};
pub use routes::Routes;
pub use socket::{
    EventSink, SocketClient, SocketFactory, SocketState, TransportEvent, TransportEventKind,
};
pub use ws::{WsSocket, WsSocketFactory};
