//! Sequential startup.
//!
//! [`Bootstrap`] runs the three startup steps in strict order: collect
//! flags from the host environment, initialize the application, bind its
//! ports to the transport. The first failure aborts the sequence; nothing
//! is retried.
//!
//! # Example
//!
//! ```no_run
//! use portwire::{Bootstrap, RelayPresenceFactory, StaticEnvironment, WsSocketFactory};
//!
//! # async fn example() -> portwire::Result<()> {
//! let env = StaticEnvironment::new(1200, 800).with_attribute("body", "data-vsn", "v3");
//!
//! let (app, binding) = Bootstrap::new(WsSocketFactory::new(), RelayPresenceFactory::new())
//!     .run(&env)
//!     .await?;
//!
//! app.ports().send(portwire::OutboundMessage::connect("ws://localhost:4000/socket"))?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use tracing::info;

use crate::app::App;
use crate::error::Result;
use crate::flags::{FlagCollector, HostEnvironment};
use crate::transport::{Binder, Binding, PresenceFactory, SocketFactory};

// ============================================================================
// Bootstrap
// ============================================================================

/// The startup sequence: flags → application → binding.
///
/// Holds the transport-construction capabilities and the flag collector
/// until [`run`](Self::run) consumes them.
pub struct Bootstrap<S, P> {
    /// Collects startup flags.
    collector: FlagCollector,
    /// Constructs the connection socket.
    socket_factory: S,
    /// Constructs the presence tracker.
    presence_factory: P,
}

impl<S, P> Bootstrap<S, P>
where
    S: SocketFactory + 'static,
    P: PresenceFactory + 'static,
{
    /// Creates a bootstrap sequence with the default flag collector.
    #[must_use]
    pub fn new(socket_factory: S, presence_factory: P) -> Self {
        Self {
            collector: FlagCollector::new(),
            socket_factory,
            presence_factory,
        }
    }

    /// Replaces the flag collector.
    ///
    /// Use this to change the root element, attribute name, or the
    /// missing-attribute policy.
    #[must_use]
    pub fn collector(mut self, collector: FlagCollector) -> Self {
        self.collector = collector;
        self
    }

    /// Runs the startup sequence to completion.
    ///
    /// Strictly sequential: environment → flags → application handle →
    /// transport binding. Returns the application handle and the owned
    /// binding; both live until process exit unless the binding is shut
    /// down explicitly.
    ///
    /// # Errors
    ///
    /// Propagates the first failure from any step; see
    /// [`FlagCollector::collect`], [`AppBuilder::build`](crate::AppBuilder::build),
    /// and [`Binder::bind`].
    pub async fn run(self, env: &impl HostEnvironment) -> Result<(App, Binding)> {
        let flags = self.collector.collect(env)?;
        let app = App::builder().flags(flags).build()?;
        let binding = Binder::new(self.socket_factory, self.presence_factory)
            .bind(&app)
            .await?;

        info!("Startup sequence complete");

        Ok((app, binding))
    }
}

// ============================================================================
// Tests
// ============================================================================
