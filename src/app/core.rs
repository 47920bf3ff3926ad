//! Application handle.
//!
//! The [`App`] handle owns the startup flags and the message port surface.
//! It is the value the transport binder is wired against, and the value
//! the embedder keeps for the life of the process.
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
//! assert_eq!(app.ports().names().len(), 2);
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::flags::StartupFlags;

use super::builder::AppBuilder;
use super::ports::Ports;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for the application handle.
pub(crate) struct AppInner {
    /// Flags collected at startup. Never mutated.
    pub flags: StartupFlags,

    /// The bidirectional message port surface.
    pub ports: Ports,
}

// ============================================================================
// App
// ============================================================================

/// Handle to an initialized application.
///
/// The handle is responsible for:
/// - Holding the startup flags for the process lifetime
/// - Exposing the fixed message port surface
///
/// Initialization runs exactly once per process lifetime; there is no
/// retry policy and no teardown short of process exit.
#[derive(Clone)]
pub struct App {
    /// Shared inner state.
    pub(crate) inner: Arc<AppInner>,
}

// ============================================================================
// App - Display
// ============================================================================

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("flags", &self.inner.flags)
            .field("bound", &self.inner.ports.is_bound())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// App - Public API
// ============================================================================

impl App {
    /// Creates a configuration builder for the application.
    #[inline]
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    /// Returns the startup flags the application was constructed with.
    #[inline]
    #[must_use]
    pub fn flags(&self) -> &StartupFlags {
        &self.inner.flags
    }

    /// Returns the message port surface.
    #[inline]
    #[must_use]
    pub fn ports(&self) -> &Ports {
        &self.inner.ports
    }
}

// ============================================================================
// App - Internal API
// ============================================================================

impl App {
    /// Initializes the application from validated flags.
    ///
    /// Atomic: the handle and its full port surface are created together.
    pub(crate) fn init(flags: StartupFlags) -> Self {
        let inner = Arc::new(AppInner {
            flags,
            ports: Ports::new(),
        });

        info!(
            height = inner.flags.height,
            width = inner.flags.width,
            vsn = %inner.flags.vsn,
            "Application initialized"
        );

        Self { inner }
    }
}

// ============================================================================
// Tests
// ============================================================================
