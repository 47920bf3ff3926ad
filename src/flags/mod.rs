//! Startup flag collection.
//!
//! At process start, three ambient values are read from the host
//! environment and assembled into a [`StartupFlags`] record: viewport
//! height, viewport width, and a version token stored as a data attribute
//! on a known root element.
//!
//! The record is created once, never mutated, and moved into the
//! application initializer. No downstream logic inspects the version
//! token's structure, so no format validation is performed.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `collector` | [`FlagCollector`] and the missing-attribute policy |
//! | `environment` | [`HostEnvironment`] trait and snapshot implementation |

// ============================================================================
// Submodules
// ============================================================================

/// Flag collector and missing-attribute policy.
pub mod collector;

/// Host environment abstraction.
pub mod environment;

// ============================================================================
// Re-exports
// ============================================================================

pub use collector::{FlagCollector, StartupFlags, VsnPolicy};
pub use environment::{HostEnvironment, StaticEnvironment};
