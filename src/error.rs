//! Error types for portwire.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use portwire::{Result, Error};
//!
//! fn example(collector: &FlagCollector, env: &impl HostEnvironment) -> Result<()> {
//!     let flags = collector.collect(env)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Flag collection | [`Error::MissingAttribute`] |
//! | Initialization | [`Error::Initialization`], [`Error::Config`] |
//! | Binding | [`Error::AlreadyBound`], [`Error::PortClosed`] |
//! | Transport | [`Error::TransportUnavailable`], [`Error::NotConnected`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`], [`Error::UrlParse`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio_tungstenite::tungstenite::Error as WsError;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Flag Collection Errors
    // ========================================================================
    /// Expected element or data attribute absent from the host environment.
    ///
    /// Only raised under [`VsnPolicy::Fatal`](crate::flags::VsnPolicy::Fatal);
    /// the default policy substitutes an empty string instead.
    #[error("Missing attribute: {attribute} on #{element_id}")]
    MissingAttribute {
        /// Identifier of the element that was looked up.
        element_id: String,
        /// Name of the absent attribute.
        attribute: String,
    },

    // ========================================================================
    // Initialization Errors
    // ========================================================================
    /// Application construction failed.
    ///
    /// Always fatal; initialization runs exactly once per process lifetime
    /// and there is no retry policy.
    #[error("Initialization failed: {message}")]
    Initialization {
        /// Description of the initialization failure.
        message: String,
    },

    /// Configuration error.
    ///
    /// Returned when a builder or factory is misconfigured.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Binding Errors
    // ========================================================================
    /// The application's ports are already bound to a transport.
    ///
    /// Binding is a one-way `unbound -> bound` transition; a second bind
    /// attempt on the same application is an error.
    #[error("Ports already bound to a transport")]
    AlreadyBound,

    /// A port channel closed underneath a send or receive.
    #[error("Port closed: {port}")]
    PortClosed {
        /// Name of the closed port.
        port: String,
    },

    // ========================================================================
    // Transport Errors
    // ========================================================================
    /// The realtime endpoint could not be reached.
    ///
    /// Non-fatal at this layer; retry and backoff belong to the transport
    /// collaborator, not the binder.
    #[error("Transport unavailable: {message}")]
    TransportUnavailable {
        /// Description of the transport failure.
        message: String,
    },

    /// A channel operation was attempted before `connect`.
    #[error("Not connected: {operation} requires an open socket")]
    NotConnected {
        /// The operation that was attempted.
        operation: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// URL parse error.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a missing attribute error.
    #[inline]
    pub fn missing_attribute(
        element_id: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::MissingAttribute {
            element_id: element_id.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an initialization error.
    #[inline]
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a port closed error.
    #[inline]
    pub fn port_closed(port: impl Into<String>) -> Self {
        Self::PortClosed { port: port.into() }
    }

    /// Creates a transport unavailable error.
    #[inline]
    pub fn transport_unavailable(message: impl Into<String>) -> Self {
        Self::TransportUnavailable {
            message: message.into(),
        }
    }

    /// Creates a not connected error.
    #[inline]
    pub fn not_connected(operation: impl Into<String>) -> Self {
        Self::NotConnected {
            operation: operation.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error should abort startup.
    ///
    /// Initialization and configuration failures are fatal; transport
    /// failures are not, because retry belongs to the collaborator.
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Initialization { .. } | Self::Config { .. } | Self::AlreadyBound
        )
    }

    /// Returns `true` if this is a transport-layer error.
    #[inline]
    #[must_use]
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            Self::TransportUnavailable { .. } | Self::NotConnected { .. } | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this is a missing attribute error.
    #[inline]
    #[must_use]
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self, Self::MissingAttribute { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
