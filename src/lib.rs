//! Portwire - startup glue for realtime-connected applications.
//!
//! This library performs the three-step startup sequence of an application
//! that talks to a realtime message endpoint: collect startup flags from
//! the host environment, initialize the application handle with those
//! flags, and wire the handle's message ports to a socket/presence
//! transport.
//!
//! # Architecture
//!
//! Data flows one direction at startup:
//!
//! - **Flag Collector**: reads viewport dimensions and a version token
//!   from a [`HostEnvironment`], producing [`StartupFlags`]
//! - **Application Initializer**: [`App::builder()`] constructs the handle
//!   atomically; the handle exposes a fixed set of named message ports
//! - **Transport Binder**: [`Binder`] performs the one-time wiring between
//!   the port surface and the transport collaborators
//!
//! Key design principles:
//!
//! - The binding is an explicitly owned [`Binding`] handle, not process
//!   state: lifecycle and teardown are visible and testable
//! - Inbound translation goes through an explicit subscription table
//!   ([`Routes`]), so unit tests invoke handlers without a live transport
//! - Transport wire concerns (reconnection, backoff, ordering) live behind
//!   the [`SocketClient`]/[`PresenceTracker`] seams, never in the glue
//!
//! # Quick Start
//!
//! ```no_run
//! use portwire::{Bootstrap, RelayPresenceFactory, StaticEnvironment, WsSocketFactory};
//!
//! #[tokio::main]
//! async fn main() -> portwire::Result<()> {
//!     // Capture the environment the application starts in
//!     let env = StaticEnvironment::new(1200, 800).with_attribute("body", "data-vsn", "v3");
//!
//!     // Flags → application → binding, in strict sequence
//!     let (app, _binding) = Bootstrap::new(WsSocketFactory::new(), RelayPresenceFactory::new())
//!         .run(&env)
//!         .await?;
//!
//!     // The application drives the transport through its ports
//!     app.ports()
//!         .send(portwire::OutboundMessage::connect("ws://localhost:4000/socket"))?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`app`] | Application handle and port surface |
//! | [`boot`] | Sequential startup |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`flags`] | Startup flag collection |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`protocol`] | Port message types |
//! | [`transport`] | Transport binding layer |

// ============================================================================
// Modules
// ============================================================================

/// Application handle and port surface.
///
/// Use [`App::builder()`] to create a configured application instance.
pub mod app;

/// Sequential startup.
///
/// [`Bootstrap`] runs flag collection, initialization, and binding in
/// strict order.
pub mod boot;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Startup flag collection.
///
/// [`FlagCollector`] reads three ambient values through [`HostEnvironment`].
pub mod flags;

/// Type-safe identifiers for ports and transport entities.
///
/// Newtype wrappers prevent mixing incompatible values at compile time.
pub mod identifiers;

/// Port message types.
///
/// Outbound transport intents and inbound transport events.
pub mod protocol;

/// Transport binding layer.
///
/// The binder, the routing table, and the socket/presence seams.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Application types
pub use app::{App, AppBuilder, Ports, TransportEnd};

// Startup
pub use boot::Bootstrap;

// Error types
pub use error::{Error, Result};

// Flag types
pub use flags::{FlagCollector, HostEnvironment, StartupFlags, StaticEnvironment, VsnPolicy};

// Identifier types
pub use identifiers::{PortName, PushRef, Topic};

// Protocol types
pub use protocol::{InboundMessage, OutboundMessage};

// Transport types
pub use transport::{
    Binder, Binding, EventSink, PresenceFactory, PresenceTracker, RelayPresence,
    RelayPresenceFactory, Routes, SocketClient, SocketFactory, SocketState, TransportEvent,
    TransportEventKind, WsSocket, WsSocketFactory,
};
