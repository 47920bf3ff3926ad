//! Port message types.
//!
//! This module defines the messages that cross the application's port
//! surface in each direction.
//!
//! # Message Flow
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | [`OutboundMessage`] | Application → Binder | Transport intent |
//! | [`InboundMessage`] | Binder → Application | Transport event |
//!
//! Outbound intents map one-to-one onto transport operations (connect,
//! join, push, leave); inbound messages are the application-consumable
//! translation of transport events (socket state changes, channel
//! messages, presence state and diffs).
//!
//! # Wire Format
//!
//! Both directions serialize as `{ "msg": ..., "payload": ... }` with
//! camelCase names, so embedders that surface ports over a JS boundary can
//! forward messages verbatim.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `outbound` | Application-emitted transport intents |
//! | `inbound` | Application-consumed transport events |

// ============================================================================
// Submodules
// ============================================================================

/// Application-emitted transport intents.
pub mod outbound;

/// Application-consumed transport events.
pub mod inbound;

// ============================================================================
// Re-exports
// ============================================================================

pub use inbound::InboundMessage;
pub use outbound::OutboundMessage;
