//! Application initialization and the port surface.
//!
//! This module provides the application side of the glue: a handle
//! constructed from [`StartupFlags`](crate::flags::StartupFlags) that
//! exposes a fixed set of named message ports.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`App`] | Application handle, holds flags and ports |
//! | [`AppBuilder`] | Fluent configuration builder |
//! | [`Ports`] | The bidirectional message port surface |
//! | [`TransportEnd`] | The binder's side of the surface |
//!
//! # Example
//!
//! ```
//! use portwire::{App, StartupFlags};
//!
//! # fn example() -> portwire::Result<()> {
//! let app = App::builder()
//!     .flags(StartupFlags::new(800, 1200, "v3"))
//!     .build()?;
//!
//! app.ports().send(portwire::OutboundMessage::connect("ws://localhost:4000/socket"))?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for application configuration.
pub mod builder;

/// Core application handle.
pub mod core;

/// Message port surface.
pub mod ports;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::AppBuilder;
pub use core::App;
pub use ports::{Ports, TransportEnd};
